//! Request, response and key-set types exchanged over the dummy OAuth HTTP surface.

use serde::{Deserialize, Serialize};

use crate::http::authorizer::AuthorizationResult;

/// Decoded query of `GET /token`.
///
/// Every field is `None` when the corresponding query parameter was not supplied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetTokenRequest {
    pub intended_audience: Option<String>,
    pub scope: Option<String>,
    pub issuer: Option<String>,
    /// Absolute expiry, seconds since the Unix epoch.
    pub expire: Option<i64>,
    pub sub: Option<String>,
    pub auth: AuthorizationResult,
}

/// Form body of `POST /token`.
///
/// Unlike [`GetTokenRequest`], a missing field is an empty string.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TokenRequestForm {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub scope: String,
}

/// `POST /token` input; `body` is `None` when no parseable body was supplied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostTokenRequest {
    pub body: Option<TokenRequestForm>,
    pub auth: AuthorizationResult,
}

/// Input of the two well-known discovery operations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WellKnownRequest {
    pub auth: AuthorizationResult,
}

/// `200` body of `GET /token`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// `200` body of `POST /token`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HttpTokenResponse {
    pub access_token: String,
    pub scope: String,
    pub token_type: String,
    pub expires_in: i64,
    pub nbf: i64,
    pub sub: String,
    pub jti: String,
    pub aud: String,
}

/// `400` body of `GET /token`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BadRequestResponse {
    pub message: String,
}

/// `400` body of `POST /token`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    pub error: String,
    pub error_description: String,
}

/// `500` body shared by every operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InternalServerErrorBody {
    pub error_message: String,
}

/// Authorization server metadata (`/.well-known/oauth-authorization-server`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub jwks_uri: String,
}

/// Public verification key in JWK form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonWebKey {
    pub kty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonWebKeySet {
    pub keys: Vec<JsonWebKey>,
}

/// Outcome of one operation.
///
/// A handler produces exactly one of the payload variants. `Unset` is the
/// value a handler starts from; writing it back yields a `500`.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseSet<T, E = BadRequestResponse> {
    Ok(T),
    BadRequest(E),
    InternalServerError(InternalServerErrorBody),
    Unset,
}

impl<T, E> Default for ResponseSet<T, E> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T, E> ResponseSet<T, E> {
    pub(crate) fn internal_server_error(error_message: impl Into<String>) -> Self {
        Self::InternalServerError(InternalServerErrorBody {
            error_message: error_message.into(),
        })
    }
}

impl<T> ResponseSet<T, BadRequestResponse> {
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(BadRequestResponse {
            message: message.into(),
        })
    }
}

impl<T> ResponseSet<T, HttpErrorResponse> {
    pub(crate) fn http_error(error: impl Into<String>, error_description: impl Into<String>) -> Self {
        Self::BadRequest(HttpErrorResponse {
            error: error.into(),
            error_description: error_description.into(),
        })
    }
}
