//! Environment-based configuration types for the dummy OAuth server.

use anyhow::Result;
use std::net::SocketAddr;

use crate::errors::ConfigError;

/// Default private key location, relative to the binary's working directory.
pub const DEFAULT_PRIVATE_KEY_FILE: &str = "../../build/test-certs/auth2.key";

/// Default JWKS endpoint advertised in the discovery metadata.
pub const DEFAULT_JWKS_URI: &str = "http://host.docker.internal:8085/.well-known/jwks.json";

/// HTTP listen address configuration
#[derive(Clone, Debug)]
pub struct HttpAddress(SocketAddr);

/// JWKS endpoint URL published in authorization server metadata
#[derive(Clone, Debug)]
pub struct JwksUri(String);

/// Main application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub version: String,
    pub http_address: HttpAddress,
    pub private_key_file: String,
    pub jwks_uri: JwksUri,
}

impl Config {
    /// Create a new configuration from environment variables
    pub fn new() -> Result<Self> {
        let http_address: HttpAddress = default_env("HTTP_ADDRESS", ":8085").try_into()?;
        let private_key_file = default_env("PRIVATE_KEY_FILE", DEFAULT_PRIVATE_KEY_FILE);
        let jwks_uri: JwksUri = default_env("JWKS_URI", DEFAULT_JWKS_URI).try_into()?;

        Ok(Self {
            version: version()?,
            http_address,
            private_key_file,
            jwks_uri,
        })
    }
}

/// Get application version from build environment
pub fn version() -> Result<String> {
    option_env!("GIT_HASH")
        .or(option_env!("CARGO_PKG_VERSION"))
        .map(|val| val.to_string())
        .ok_or(ConfigError::VersionNotSet.into())
}

fn default_env(name: &str, default_value: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default_value.to_string())
}

impl TryFrom<String> for HttpAddress {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        // ":8085" binds every interface
        let candidate = if value.starts_with(':') {
            format!("0.0.0.0{value}")
        } else {
            value.clone()
        };
        candidate
            .parse::<SocketAddr>()
            .map(Self)
            .map_err(|err| ConfigError::AddressParsingFailed(value, err))
    }
}

impl AsRef<SocketAddr> for HttpAddress {
    fn as_ref(&self) -> &SocketAddr {
        &self.0
    }
}

impl TryFrom<String> for JwksUri {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match url::Url::parse(&value) {
            // Served verbatim, not in the normalized form
            Ok(_) => Ok(Self(value)),
            Err(err) => Err(ConfigError::InvalidJwksUri(value, err)),
        }
    }
}

impl AsRef<str> for JwksUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
