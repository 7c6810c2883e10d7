//! Dummy OAuth Integration Tests
//!
//! These tests drive the assembled application over HTTP: token issuance through
//! both GET and POST, discovery metadata, the published key set and router fallthrough.

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use dummy_oauth::{
    http::{
        ApiRouter, AppState, MultiRouter, PermissiveAuthorizer, build_router, make_api_router,
        response::write_json, router::handler,
    },
    key_provider::{PemFileKeyProvider, SigningKeyProvider},
    oauth::{
        DiscoveryService, DummyOAuth, Implementation, TokenService,
        discovery::{STATIC_JWK_E, STATIC_JWK_KID, STATIC_JWK_N},
        types::*,
    },
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

const JWKS_URI: &str = "http://localhost:8085/.well-known/jwks.json";

async fn dummy_oauth() -> DummyOAuth {
    let key_file = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/test-certs/auth2.key");
    let signing_key = PemFileKeyProvider::new(key_file)
        .signing_key()
        .await
        .unwrap();
    DummyOAuth::new(
        TokenService::new(Arc::new(signing_key)),
        DiscoveryService::new(JWKS_URI),
    )
}

fn app_with(implementation: Arc<dyn Implementation>) -> Router {
    let state = AppState::new(implementation, Arc::new(PermissiveAuthorizer));
    build_router(MultiRouter::new().with_router(make_api_router(state).unwrap()))
}

async fn build_app() -> Router {
    app_with(Arc::new(dummy_oauth().await))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_form(body: &'static str) -> Request<Body> {
    Request::post("/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn claims(token: &str) -> Value {
    let segment = token.split('.').nth(1).unwrap();
    serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segment).unwrap()).unwrap()
}

#[tokio::test]
async fn test_get_token_with_defaults() {
    let now = chrono::Utc::now().timestamp();
    let (status, body) = send(
        build_app().await,
        get("/token?intended_audience=localhost&scope=dss.read.identification_service_areas"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let claims = claims(body["access_token"].as_str().unwrap());
    assert_eq!(claims["aud"], "localhost");
    assert_eq!(claims["scope"], "dss.read.identification_service_areas");
    assert_eq!(claims["iss"], "dummyoauth");
    assert_eq!(claims["sub"], "fake_uss");
    assert!((claims["exp"].as_i64().unwrap() - (now + 3600)).abs() <= 5);
}

#[tokio::test]
async fn test_get_token_with_overrides() {
    let (status, body) = send(
        build_app().await,
        get("/token?intended_audience=aud1&scope=read&issuer=dummy&expire=2000000000&sub=uss1&grant_type=client_credentials"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let claims = claims(body["access_token"].as_str().unwrap());
    assert_eq!(
        claims,
        json!({"aud": "aud1", "scope": "read", "iss": "dummy", "exp": 2000000000, "sub": "uss1"})
    );
}

#[tokio::test]
async fn test_get_token_missing_audience() {
    let (status, body) = send(build_app().await, get("/token?scope=read")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"message": "Missing `intended_audience` query parameter"})
    );
}

#[tokio::test]
async fn test_get_token_missing_scope() {
    let (status, body) = send(build_app().await, get("/token?intended_audience=aud1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Missing `scope` query parameter"}));
}

#[tokio::test]
async fn test_token_verifies_against_published_jwks() {
    let app = build_app().await;
    let (_, token) = send(app.clone(), get("/token?intended_audience=aud1&scope=read")).await;
    let (_, jwks) = send(app, get("/.well-known/jwks.json")).await;

    let key = &jwks["keys"][0];
    let decoding_key =
        DecodingKey::from_rsa_components(key["n"].as_str().unwrap(), key["e"].as_str().unwrap())
            .unwrap();
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&["aud1"]);

    let decoded = decode::<Value>(
        token["access_token"].as_str().unwrap(),
        &decoding_key,
        &validation,
    )
    .unwrap();
    assert_eq!(decoded.claims["scope"], "read");
}

#[tokio::test]
async fn test_post_token_without_client_id() {
    let (status, body) = send(build_app().await, post_form("scope=read&audience=aud1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sub"], "MissingClientId");
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["scope"], "read");
    assert_eq!(body["aud"], "aud1");
    assert!(uuid::Uuid::parse_str(body["jti"].as_str().unwrap()).is_ok());

    let claims = claims(body["access_token"].as_str().unwrap());
    assert_eq!(claims["iss"], "dummy.auth");
    assert_eq!(claims["sub"], "MissingClientId");
    assert_eq!(claims["jti"], body["jti"]);
    assert_eq!(claims["expires_in"], body["expires_in"]);
    assert_eq!(claims["nbf"], body["nbf"]);
    assert!(claims.get("exp").is_none());
}

#[tokio::test]
async fn test_post_token_jti_unique_across_calls() {
    let app = build_app().await;
    let (_, first) = send(app.clone(), post_form("client_id=uss1&scope=read&audience=aud1")).await;
    let (_, second) = send(app, post_form("client_id=uss1&scope=read&audience=aud1")).await;

    assert_ne!(first["jti"], second["jti"]);
    assert_ne!(first["access_token"], second["access_token"]);
    assert_eq!(first["sub"], "uss1");
    assert_eq!(first["sub"], second["sub"]);
}

#[tokio::test]
async fn test_post_token_empty_body() {
    let (status, body) = send(build_app().await, post_form("")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": "Missing request body",
            "error_description": "Body is required with grant_type, client_id, scope, audience, current_timestamp"
        })
    );
}

#[tokio::test]
async fn test_post_token_missing_scope() {
    let (status, body) = send(build_app().await, post_form("audience=aud1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": "Missing scope in request body",
            "error_description": "Body is required with scope and audience. client_id is optional"
        })
    );
}

#[tokio::test]
async fn test_post_token_missing_audience() {
    let (status, body) = send(build_app().await, post_form("scope=read")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing audience in request body");
}

#[tokio::test]
async fn test_authorization_server_metadata() {
    let (status, body) = send(
        build_app().await,
        get("/.well-known/oauth-authorization-server"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"jwks_uri": JWKS_URI}));
}

#[tokio::test]
async fn test_jwks() {
    let (status, body) = send(build_app().await, get("/.well-known/jwks.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"keys": [{"kty": "RSA", "e": STATIC_JWK_E, "n": STATIC_JWK_N, "kid": STATIC_JWK_KID}]})
    );
}

#[tokio::test]
async fn test_unregistered_routes_are_not_found() {
    let app = build_app().await;

    let (status, _) = send(app.clone(), get("/.well-known/openid-configuration")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/.well-known/jwks.json")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unhandled_requests_fall_through_to_next_router() {
    let state = AppState::new(Arc::new(dummy_oauth().await), Arc::new(PermissiveAuthorizer));
    let health = ApiRouter::new()
        .route(
            Method::GET,
            "^/health$",
            handler(|_request| async { write_json(StatusCode::OK, &json!({"status": "ok"})) }),
        )
        .unwrap();
    let app = build_router(
        MultiRouter::new()
            .with_router(make_api_router(state).unwrap())
            .with_router(health),
    );

    let (status, body) = send(app.clone(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, _) = send(app, get("/.well-known/jwks.json")).await;
    assert_eq!(status, StatusCode::OK);
}

/// Leaves every response unset.
struct SilentImplementation;

#[async_trait]
impl Implementation for SilentImplementation {
    async fn get_token(
        &self,
        _scope: CancellationToken,
        _request: GetTokenRequest,
    ) -> ResponseSet<TokenResponse> {
        ResponseSet::default()
    }

    async fn post_token(
        &self,
        _scope: CancellationToken,
        _request: PostTokenRequest,
    ) -> ResponseSet<HttpTokenResponse, HttpErrorResponse> {
        ResponseSet::default()
    }

    async fn get_well_known_authorization_server_metadata(
        &self,
        _scope: CancellationToken,
        _request: WellKnownRequest,
    ) -> ResponseSet<Metadata> {
        ResponseSet::default()
    }

    async fn get_well_known_jwks(
        &self,
        scope: CancellationToken,
        _request: WellKnownRequest,
    ) -> ResponseSet<JsonWebKeySet> {
        assert!(!scope.is_cancelled());
        ResponseSet::default()
    }
}

#[tokio::test]
async fn test_unset_response_is_internal_server_error() {
    let app = app_with(Arc::new(SilentImplementation));

    for request in [
        get("/token?intended_audience=aud1&scope=read"),
        post_form("scope=read&audience=aud1"),
        get("/.well-known/oauth-authorization-server"),
        get("/.well-known/jwks.json"),
    ] {
        let (status, body) = send(app.clone(), request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error_message": "Handler implementation did not set a response."})
        );
    }
}
