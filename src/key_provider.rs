//! RS256 signing key and the providers that load it at startup.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use rsa::{
    RsaPrivateKey, pkcs1::DecodeRsaPrivateKey, pkcs8::DecodePrivateKey, traits::PublicKeyParts,
};
use serde::Serialize;
use std::path::PathBuf;

use crate::errors::KeyError;
use crate::oauth::types::JsonWebKey;

/// Base64url-encoded public half of an RSA key.
#[derive(Clone, Debug, PartialEq)]
pub struct RsaPublicComponents {
    pub n: String,
    pub e: String,
}

/// Process-wide private key used to sign every issued token.
#[derive(Clone)]
pub struct SigningKey {
    encoding_key: EncodingKey,
    public: Option<RsaPublicComponents>,
}

impl SigningKey {
    /// Parse an RSA private key from a PKCS#1 or PKCS#8 PEM document.
    pub fn from_rsa_pem(pem: &[u8]) -> Result<Self, KeyError> {
        let text = std::str::from_utf8(pem).map_err(|e| KeyError::InvalidPem(e.to_string()))?;
        let private_key = RsaPrivateKey::from_pkcs1_pem(text)
            .or_else(|_| RsaPrivateKey::from_pkcs8_pem(text))
            .map_err(|e| KeyError::InvalidPem(e.to_string()))?;

        let public = RsaPublicComponents {
            n: URL_SAFE_NO_PAD.encode(private_key.n().to_bytes_be()),
            e: URL_SAFE_NO_PAD.encode(private_key.e().to_bytes_be()),
        };

        Ok(Self {
            encoding_key: EncodingKey::from_rsa_pem(pem)?,
            public: Some(public),
        })
    }

    /// Wrap an already-built encoding key whose public half is unknown.
    pub fn from_encoding_key(encoding_key: EncodingKey) -> Self {
        Self {
            encoding_key,
            public: None,
        }
    }

    pub fn public_components(&self) -> Option<&RsaPublicComponents> {
        self.public.as_ref()
    }

    /// Returns true when `jwk` publishes this key's public half.
    pub fn matches(&self, jwk: &JsonWebKey) -> bool {
        match &self.public {
            Some(public) => {
                jwk.kty == "RSA"
                    && jwk.n.as_deref() == Some(public.n.as_str())
                    && jwk.e.as_deref() == Some(public.e.as_str())
            }
            None => false,
        }
    }

    /// Sign `claims` as a compact RS256 JWT.
    pub fn sign<C: Serialize>(&self, claims: &C) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::new(Algorithm::RS256), claims, &self.encoding_key)
    }
}

/// Supplies the signing key once at startup.
#[async_trait]
pub trait SigningKeyProvider: Send + Sync {
    async fn signing_key(&self) -> Result<SigningKey, KeyError>;
}

/// Reads the signing key from a PEM file on disk.
#[derive(Clone, Debug)]
pub struct PemFileKeyProvider {
    path: PathBuf,
}

impl PemFileKeyProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SigningKeyProvider for PemFileKeyProvider {
    async fn signing_key(&self) -> Result<SigningKey, KeyError> {
        let pem = tokio::fs::read(&self.path)
            .await
            .map_err(|e| KeyError::ReadFailed(self.path.display().to_string(), e))?;
        SigningKey::from_rsa_pem(&pem)
    }
}
