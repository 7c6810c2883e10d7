//! Pluggable request authorization consulted before every routed operation.

use http::request::Parts;

/// A security scheme an operation may be reached through, with the scopes it needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SecurityScheme {
    pub name: &'static str,
    pub scopes: &'static [&'static str],
}

/// None of the dummy OAuth operations require credentials.
pub const GET_TOKEN_SECURITY: &[SecurityScheme] = &[];
pub const POST_TOKEN_SECURITY: &[SecurityScheme] = &[];
pub const GET_WELL_KNOWN_AUTHORIZATION_SERVER_METADATA_SECURITY: &[SecurityScheme] = &[];
pub const GET_WELL_KNOWN_JWKS_SECURITY: &[SecurityScheme] = &[];

/// Result of authorizing one request. Carried with the decoded request and not
/// inspected by the dummy OAuth operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorizationResult {
    pub client_id: Option<String>,
    pub scopes: Vec<String>,
    pub error: Option<String>,
}

pub trait Authorizer: Send + Sync {
    fn authorize(&self, request: &Parts, schemes: &[SecurityScheme]) -> AuthorizationResult;
}

/// Accepts every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct PermissiveAuthorizer;

impl Authorizer for PermissiveAuthorizer {
    fn authorize(&self, _request: &Parts, _schemes: &[SecurityScheme]) -> AuthorizationResult {
        AuthorizationResult::default()
    }
}
