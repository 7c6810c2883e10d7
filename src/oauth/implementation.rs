//! Operations the dummy OAuth router dispatches to.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{
    discovery::DiscoveryService,
    token_service::TokenService,
    types::{
        GetTokenRequest, HttpErrorResponse, HttpTokenResponse, JsonWebKeySet, Metadata,
        PostTokenRequest, ResponseSet, TokenResponse, WellKnownRequest,
    },
};

/// One method per routed operation.
///
/// `scope` is cancelled as soon as the router has written the response.
#[async_trait]
pub trait Implementation: Send + Sync {
    async fn get_token(
        &self,
        scope: CancellationToken,
        request: GetTokenRequest,
    ) -> ResponseSet<TokenResponse>;

    async fn post_token(
        &self,
        scope: CancellationToken,
        request: PostTokenRequest,
    ) -> ResponseSet<HttpTokenResponse, HttpErrorResponse>;

    async fn get_well_known_authorization_server_metadata(
        &self,
        scope: CancellationToken,
        request: WellKnownRequest,
    ) -> ResponseSet<Metadata>;

    async fn get_well_known_jwks(
        &self,
        scope: CancellationToken,
        request: WellKnownRequest,
    ) -> ResponseSet<JsonWebKeySet>;
}

/// Token issuance and discovery behind a single [`Implementation`].
#[derive(Clone)]
pub struct DummyOAuth {
    tokens: TokenService,
    discovery: DiscoveryService,
}

impl DummyOAuth {
    pub fn new(tokens: TokenService, discovery: DiscoveryService) -> Self {
        Self { tokens, discovery }
    }
}

#[async_trait]
impl Implementation for DummyOAuth {
    async fn get_token(
        &self,
        _scope: CancellationToken,
        request: GetTokenRequest,
    ) -> ResponseSet<TokenResponse> {
        self.tokens.get_token(&request)
    }

    async fn post_token(
        &self,
        _scope: CancellationToken,
        request: PostTokenRequest,
    ) -> ResponseSet<HttpTokenResponse, HttpErrorResponse> {
        self.tokens.post_token(&request)
    }

    async fn get_well_known_authorization_server_metadata(
        &self,
        _scope: CancellationToken,
        _request: WellKnownRequest,
    ) -> ResponseSet<Metadata> {
        self.discovery.get_well_known_authorization_server_metadata()
    }

    async fn get_well_known_jwks(
        &self,
        _scope: CancellationToken,
        _request: WellKnownRequest,
    ) -> ResponseSet<JsonWebKeySet> {
        self.discovery.get_well_known_jwks()
    }
}
