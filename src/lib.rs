pub mod error;
pub mod config;
pub mod model;
pub mod parse;
pub mod normalize;
pub mod client;
pub mod import;
