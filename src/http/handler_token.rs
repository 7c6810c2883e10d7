//! Handles GET and POST /token - decodes the query or form body and mints an access token

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use url::form_urlencoded;

use super::{
    authorizer::{GET_TOKEN_SECURITY, POST_TOKEN_SECURITY},
    context::{AppState, request_scope},
};
use crate::oauth::types::{GetTokenRequest, PostTokenRequest, TokenRequestForm};

/// Upper bound on a buffered `POST /token` body.
const MAX_FORM_BYTES: usize = 64 * 1024;

/// GET /token
pub async fn handle_get_token(state: AppState, request: Request) -> Response {
    let (parts, _body) = request.into_parts();
    let auth = state.authorizer.authorize(&parts, GET_TOKEN_SECURITY);

    let mut get_token_request = parse_token_query(parts.uri.query().unwrap_or_default());
    get_token_request.auth = auth;

    let (scope, _guard) = request_scope();
    let response = state
        .implementation
        .get_token(scope.clone(), get_token_request)
        .await
        .into_response();
    tracing::debug!(method = %parts.method, path = %parts.uri.path(), status = %response.status(), "handled request");
    response
}

/// POST /token
pub async fn handle_post_token(state: AppState, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let auth = state.authorizer.authorize(&parts, POST_TOKEN_SECURITY);

    let body = match axum::body::to_bytes(body, MAX_FORM_BYTES).await {
        Ok(bytes) if !bytes.is_empty() => Some(parse_token_form(&bytes)),
        Ok(_) => None,
        Err(err) => {
            tracing::warn!(error = ?err, "unable to read token request body");
            None
        }
    };
    let post_token_request = PostTokenRequest { body, auth };

    let (scope, _guard) = request_scope();
    let response = state
        .implementation
        .post_token(scope.clone(), post_token_request)
        .await
        .into_response();
    tracing::debug!(method = %parts.method, path = %parts.uri.path(), status = %response.status(), "handled request");
    response
}

/// Empty values count as absent, and an `expire` that is not an integer is ignored.
pub(crate) fn parse_token_query(query: &str) -> GetTokenRequest {
    let value = |name: &str| {
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    };

    GetTokenRequest {
        intended_audience: value("intended_audience"),
        scope: value("scope"),
        issuer: value("issuer"),
        expire: value("expire").and_then(|expire| expire.parse::<i64>().ok()),
        sub: value("sub"),
        ..Default::default()
    }
}

/// The first occurrence of a repeated field wins; missing fields are empty.
pub(crate) fn parse_token_form(body: &[u8]) -> TokenRequestForm {
    let (mut client_id, mut audience, mut scope) = (None, None, None);
    for (key, value) in form_urlencoded::parse(body) {
        let slot = match &*key {
            "client_id" => &mut client_id,
            "audience" => &mut audience,
            "scope" => &mut scope,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    TokenRequestForm {
        client_id: client_id.unwrap_or_default(),
        audience: audience.unwrap_or_default(),
        scope: scope.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_query_all_parameters() {
        let request = parse_token_query(
            "intended_audience=localhost&scope=dss.read%20dss.write&issuer=dummy&expire=1700000000&sub=uss1",
        );
        assert_eq!(request.intended_audience.as_deref(), Some("localhost"));
        assert_eq!(request.scope.as_deref(), Some("dss.read dss.write"));
        assert_eq!(request.issuer.as_deref(), Some("dummy"));
        assert_eq!(request.expire, Some(1_700_000_000));
        assert_eq!(request.sub.as_deref(), Some("uss1"));
    }

    #[test]
    fn test_parse_token_query_absent_and_empty() {
        let request = parse_token_query("scope=&issuer=dummy");
        assert_eq!(request.intended_audience, None);
        assert_eq!(request.scope, None);
        assert_eq!(request.issuer.as_deref(), Some("dummy"));
        assert_eq!(request.sub, None);
    }

    #[test]
    fn test_parse_token_query_ignores_unparseable_expire() {
        assert_eq!(parse_token_query("expire=tomorrow").expire, None);
        assert_eq!(parse_token_query("expire=-5").expire, Some(-5));
    }

    #[test]
    fn test_parse_token_query_first_value_wins() {
        let request = parse_token_query("sub=first&sub=second");
        assert_eq!(request.sub.as_deref(), Some("first"));
    }

    #[test]
    fn test_parse_token_form() {
        let form = parse_token_form(b"grant_type=client_credentials&client_id=uss1&audience=aud1&scope=read+write");
        assert_eq!(
            form,
            TokenRequestForm {
                client_id: "uss1".to_string(),
                audience: "aud1".to_string(),
                scope: "read write".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_token_form_missing_fields_are_empty() {
        let form = parse_token_form(b"scope=read&scope=ignored");
        assert_eq!(form.scope, "read");
        assert_eq!(form.client_id, "");
        assert_eq!(form.audience, "");
    }
}
