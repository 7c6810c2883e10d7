//! Standardized error types following the `error-dummyoauth-<domain>-<number>` format.

use thiserror::Error;

/// Configuration errors that occur during application startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error when the listen address cannot be parsed
    #[error("error-dummyoauth-config-1 Parsing HTTP_ADDRESS '{0}' failed: {1}")]
    AddressParsingFailed(String, std::net::AddrParseError),

    /// Error when the JWKS URI is not an absolute URL
    #[error("error-dummyoauth-config-2 Invalid JWKS_URI '{0}': {1}")]
    InvalidJwksUri(String, url::ParseError),

    /// Error when version information is not available
    #[error("error-dummyoauth-config-3 One of GIT_HASH or CARGO_PKG_VERSION must be set")]
    VersionNotSet,
}

/// Signing key loading errors
#[derive(Debug, Error)]
pub enum KeyError {
    /// Error when the private key file cannot be read
    #[error("error-dummyoauth-key-1 Unable to read private key file '{0}': {1}")]
    ReadFailed(String, std::io::Error),

    /// Error when the PEM document is not an RSA private key
    #[error("error-dummyoauth-key-2 Private key is not an RSA PEM (PKCS#1 or PKCS#8): {0}")]
    InvalidPem(String),

    /// Error when the signer rejects the key material
    #[error("error-dummyoauth-key-3 Private key rejected for RS256 signing: {0}")]
    SignerRejected(#[from] jsonwebtoken::errors::Error),
}

/// Route table construction errors
#[derive(Debug, Error)]
pub enum RouterError {
    /// Error when a route pattern is not a valid regular expression
    #[error("error-dummyoauth-router-1 Invalid route pattern '{0}': {1}")]
    InvalidPattern(String, regex::Error),
}
