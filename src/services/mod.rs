pub mod provider_client;
pub mod search_service;

pub use provider_client::*;
pub use search_service::*;
