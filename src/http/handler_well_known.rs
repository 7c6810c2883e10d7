//! Handles the well-known discovery endpoints - authorization server metadata and JWKS

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};

use super::{
    authorizer::{
        GET_WELL_KNOWN_AUTHORIZATION_SERVER_METADATA_SECURITY, GET_WELL_KNOWN_JWKS_SECURITY,
    },
    context::{AppState, request_scope},
};
use crate::oauth::types::WellKnownRequest;

/// OAuth 2.0 Authorization Server Metadata handler
/// GET /.well-known/oauth-authorization-server
pub async fn handle_authorization_server_metadata(state: AppState, request: Request) -> Response {
    let (parts, _body) = request.into_parts();
    let auth = state
        .authorizer
        .authorize(&parts, GET_WELL_KNOWN_AUTHORIZATION_SERVER_METADATA_SECURITY);

    let (scope, _guard) = request_scope();
    let response = state
        .implementation
        .get_well_known_authorization_server_metadata(scope.clone(), WellKnownRequest { auth })
        .await
        .into_response();
    tracing::debug!(path = %parts.uri.path(), status = %response.status(), "handled request");
    response
}

/// JWKS (JSON Web Key Set) handler
/// GET /.well-known/jwks.json
pub async fn handle_jwks(state: AppState, request: Request) -> Response {
    let (parts, _body) = request.into_parts();
    let auth = state
        .authorizer
        .authorize(&parts, GET_WELL_KNOWN_JWKS_SECURITY);

    let (scope, _guard) = request_scope();
    let response = state
        .implementation
        .get_well_known_jwks(scope.clone(), WellKnownRequest { auth })
        .await
        .into_response();
    tracing::debug!(path = %parts.uri.path(), status = %response.status(), "handled request");
    response
}
