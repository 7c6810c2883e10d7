//! Token issuance and discovery logic behind the dummy OAuth endpoints.

pub mod discovery;
pub mod implementation;
pub mod token_service;
pub mod types;

pub use discovery::DiscoveryService;
pub use implementation::{DummyOAuth, Implementation};
pub use token_service::TokenService;
pub use types::*;
