pub mod contact_normalizer;
pub mod dedup;
pub mod profile_mapper;

pub use contact_normalizer::{normalize_contacts, normalize_feed, parse_entry};
pub use dedup::dedup_contacts;
pub use profile_mapper::current_user;
