//! Mints RS256 access tokens for `GET /token` and `POST /token`.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::types::{
    GetTokenRequest, HttpErrorResponse, HttpTokenResponse, PostTokenRequest, ResponseSet,
    TokenResponse,
};
use crate::key_provider::SigningKey;

/// Issuer used by `GET /token` when none is requested.
pub const DEFAULT_ISSUER: &str = "dummyoauth";

/// Subject used by `GET /token` when none is requested.
pub const DEFAULT_SUBJECT: &str = "fake_uss";

/// Issuer of every `POST /token` token.
pub const FORM_ISSUER: &str = "dummy.auth";

/// Subject of a `POST /token` token when the form has no `client_id`.
pub const MISSING_CLIENT_ID: &str = "MissingClientId";

pub const TOKEN_TYPE_BEARER: &str = "bearer";

const MISSING_FORM_FIELD_DESCRIPTION: &str =
    "Body is required with scope and audience. client_id is optional";

/// Claims of a token minted from query parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryTokenClaims {
    pub aud: String,
    pub scope: String,
    pub iss: String,
    pub exp: i64,
    pub sub: String,
}

/// Claims of a token minted from a form body.
///
/// `expires_in` carries the absolute expiry in epoch seconds, not a duration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormTokenClaims {
    pub token_type: String,
    pub aud: String,
    pub scope: String,
    pub iss: String,
    pub expires_in: i64,
    pub sub: String,
    pub nbf: i64,
    pub jti: String,
}

#[derive(Clone)]
pub struct TokenService {
    signing_key: Arc<SigningKey>,
}

impl TokenService {
    pub fn new(signing_key: Arc<SigningKey>) -> Self {
        Self { signing_key }
    }

    pub fn get_token(&self, request: &GetTokenRequest) -> ResponseSet<TokenResponse> {
        let Some(intended_audience) = request.intended_audience.clone() else {
            return ResponseSet::bad_request("Missing `intended_audience` query parameter");
        };
        let Some(scope) = request.scope.clone() else {
            return ResponseSet::bad_request("Missing `scope` query parameter");
        };

        let claims = QueryTokenClaims {
            aud: intended_audience,
            scope,
            iss: request
                .issuer
                .clone()
                .unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
            exp: request
                .expire
                .unwrap_or_else(|| (Utc::now() + Duration::hours(1)).timestamp()),
            sub: request
                .sub
                .clone()
                .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        };

        match self.signing_key.sign(&claims) {
            Ok(access_token) => {
                tracing::debug!(aud = %claims.aud, sub = %claims.sub, "issued query token");
                ResponseSet::Ok(TokenResponse { access_token })
            }
            Err(err) => {
                tracing::error!(error = ?err, "token signing failed");
                ResponseSet::internal_server_error(err.to_string())
            }
        }
    }

    pub fn post_token(
        &self,
        request: &PostTokenRequest,
    ) -> ResponseSet<HttpTokenResponse, HttpErrorResponse> {
        let Some(body) = &request.body else {
            return ResponseSet::http_error(
                "Missing request body",
                "Body is required with grant_type, client_id, scope, audience, current_timestamp",
            );
        };

        if body.scope.is_empty() {
            return ResponseSet::http_error(
                "Missing scope in request body",
                MISSING_FORM_FIELD_DESCRIPTION,
            );
        }
        let sub = if body.client_id.is_empty() {
            MISSING_CLIENT_ID.to_string()
        } else {
            body.client_id.clone()
        };
        if body.audience.is_empty() {
            return ResponseSet::http_error(
                "Missing audience in request body",
                MISSING_FORM_FIELD_DESCRIPTION,
            );
        }

        let now = Utc::now();
        let claims = FormTokenClaims {
            token_type: TOKEN_TYPE_BEARER.to_string(),
            aud: body.audience.clone(),
            scope: body.scope.clone(),
            iss: FORM_ISSUER.to_string(),
            expires_in: (now + Duration::hours(1)).timestamp(),
            sub,
            nbf: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        match self.signing_key.sign(&claims) {
            Ok(access_token) => {
                tracing::debug!(aud = %claims.aud, sub = %claims.sub, jti = %claims.jti, "issued form token");
                ResponseSet::Ok(HttpTokenResponse {
                    access_token,
                    scope: claims.scope,
                    token_type: claims.token_type,
                    expires_in: claims.expires_in,
                    nbf: claims.nbf,
                    sub: claims.sub,
                    jti: claims.jti,
                    aud: claims.aud,
                })
            }
            Err(err) => {
                tracing::error!(error = ?err, "token signing failed");
                ResponseSet::internal_server_error(err.to_string())
            }
        }
    }
}
