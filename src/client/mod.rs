pub mod fetcher;
pub mod token_exchange;

pub use fetcher::{AuthenticatedFetcher, FetchRequest, UreqFetcher};
pub use token_exchange::{OAuth2CodeExchange, StaticToken, TokenExchangeAdapter};
