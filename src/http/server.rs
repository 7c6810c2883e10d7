//! Route table for the dummy OAuth operations and assembly of the axum application.

use axum::{Router, extract::Request, http::Method};
use tower_http::trace::TraceLayer;

use super::{
    context::AppState,
    handler_token::{handle_get_token, handle_post_token},
    handler_well_known::{handle_authorization_server_metadata, handle_jwks},
    router::{ApiRouter, MultiRouter, handler},
};
use crate::errors::RouterError;

pub const TOKEN_PATTERN: &str = "^/token";
pub const AUTHORIZATION_SERVER_METADATA_PATTERN: &str =
    r"^/\.well-known/oauth-authorization-server$";
pub const JWKS_PATTERN: &str = r"^/\.well-known/jwks\.json$";

/// Build the router for the four dummy OAuth operations, in dispatch order.
pub fn make_api_router(state: AppState) -> Result<ApiRouter, RouterError> {
    let get_token = {
        let state = state.clone();
        handler(move |request| handle_get_token(state.clone(), request))
    };
    let post_token = {
        let state = state.clone();
        handler(move |request| handle_post_token(state.clone(), request))
    };
    let metadata = {
        let state = state.clone();
        handler(move |request| handle_authorization_server_metadata(state.clone(), request))
    };
    let jwks = handler(move |request| handle_jwks(state.clone(), request));

    ApiRouter::new()
        .route(Method::GET, TOKEN_PATTERN, get_token)?
        .route(Method::POST, TOKEN_PATTERN, post_token)?
        .route(Method::GET, AUTHORIZATION_SERVER_METADATA_PATTERN, metadata)?
        .route(Method::GET, JWKS_PATTERN, jwks)
}

/// Build the application router, answering every request through `routers`.
pub fn build_router(routers: MultiRouter) -> Router {
    Router::new()
        .fallback(move |request: Request| {
            let routers = routers.clone();
            async move { routers.serve(request).await }
        })
        .layer(TraceLayer::new_for_http())
}
