//! Authorization server metadata and the published JSON Web Key Set.

use super::types::{JsonWebKey, JsonWebKeySet, Metadata, ResponseSet};

/// Public exponent of the published verification key.
pub const STATIC_JWK_E: &str = "AQAB";

/// Modulus of the published verification key (`test-certs/auth2.pem`).
pub const STATIC_JWK_N: &str = "eQ22nLcYHRhMKXZUIJ3baLSsnAgYFJrMPhBEq8fqtyHQg_iKBv7Tavu3Rf_-26PRVvC0nPdwQgI_w4ZKqt1NIIaPljTc5raA-TH_RzRXwPR5JdL8JQLSqtgecAYuqSjt5bzsdbSuHueeXZsHgu75Hx86ZC3l-sInl5OTPArlhzM";

/// Key identifier of the published verification key.
pub const STATIC_JWK_KID: &str = "cadd2909-8638-4b2d-8e47-2d9816fe360e";

/// The single key served from `/.well-known/jwks.json`.
///
/// This is a fixture for the `auth2` test key pair and is not derived from the
/// configured signing key; see [`crate::key_provider::SigningKey::matches`].
pub fn static_jwk() -> JsonWebKey {
    JsonWebKey {
        kty: "RSA".to_string(),
        e: Some(STATIC_JWK_E.to_string()),
        n: Some(STATIC_JWK_N.to_string()),
        kid: Some(STATIC_JWK_KID.to_string()),
    }
}

/// Serves discovery metadata and the static key set.
#[derive(Clone, Debug)]
pub struct DiscoveryService {
    jwks_uri: String,
}

impl DiscoveryService {
    pub fn new(jwks_uri: impl Into<String>) -> Self {
        Self {
            jwks_uri: jwks_uri.into(),
        }
    }

    pub fn get_well_known_authorization_server_metadata(&self) -> ResponseSet<Metadata> {
        ResponseSet::Ok(Metadata {
            jwks_uri: self.jwks_uri.clone(),
        })
    }

    pub fn get_well_known_jwks(&self) -> ResponseSet<JsonWebKeySet> {
        ResponseSet::Ok(JsonWebKeySet {
            keys: vec![static_jwk()],
        })
    }
}
