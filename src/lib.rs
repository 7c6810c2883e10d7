//! Dummy OAuth authorization server library crate.
//!
//! Issues RS256-signed access tokens on demand and publishes the discovery
//! metadata and key set relying parties use to validate them in integration tests.

pub mod config;
pub mod errors;
pub mod http;
pub mod key_provider;
pub mod oauth;
