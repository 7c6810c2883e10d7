//! Ordered first-match request dispatch and composition of several routers.

use async_trait::async_trait;
use axum::{
    extract::Request,
    http::{Method, StatusCode},
    response::Response,
};
use futures::future::BoxFuture;
use regex::Regex;
use serde_json::json;
use std::{future::Future, sync::Arc};

use super::response::write_json;
use crate::errors::RouterError;

/// Handler invoked for a matched route; it always produces the response.
pub type RouteHandler = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// Box an async function as a [`RouteHandler`].
pub fn handler<F, Fut>(f: F) -> RouteHandler
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(move |request| Box::pin(f(request)))
}

#[derive(Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: Regex,
    pub handler: RouteHandler,
}

impl Route {
    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method == method && self.pattern.is_match(path)
    }
}

/// Result of offering a request to a router.
pub enum Dispatch {
    Handled(Response),
    /// No route matched; the untouched request is handed back.
    Unhandled(Request),
}

/// A router that may decline a request so another one can try it.
#[async_trait]
pub trait PartialRouter: Send + Sync {
    async fn handle(&self, request: Request) -> Dispatch;
}

/// Routes scanned in registration order; the first route whose method and
/// path pattern both match wins.
#[derive(Clone, Default)]
pub struct ApiRouter {
    routes: Vec<Route>,
}

impl ApiRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. `pattern` is a regular expression matched against the request path.
    pub fn route(
        mut self,
        method: Method,
        pattern: &str,
        handler: RouteHandler,
    ) -> Result<Self, RouterError> {
        let pattern = Regex::new(pattern)
            .map_err(|err| RouterError::InvalidPattern(pattern.to_string(), err))?;
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
        Ok(self)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    fn find(&self, method: &Method, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(method, path))
    }
}

#[async_trait]
impl PartialRouter for ApiRouter {
    async fn handle(&self, request: Request) -> Dispatch {
        let Some(route) = self.find(request.method(), request.uri().path()) else {
            return Dispatch::Unhandled(request);
        };

        let handler = route.handler.clone();
        Dispatch::Handled(handler(request).await)
    }
}

/// Offers each request to its routers in order and answers `404` when all decline.
#[derive(Clone, Default)]
pub struct MultiRouter {
    routers: Vec<Arc<dyn PartialRouter>>,
}

impl MultiRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_router(mut self, router: impl PartialRouter + 'static) -> Self {
        self.routers.push(Arc::new(router));
        self
    }

    pub async fn serve(&self, request: Request) -> Response {
        let mut request = request;
        for router in &self.routers {
            match router.handle(request).await {
                Dispatch::Handled(response) => return response,
                Dispatch::Unhandled(unhandled) => request = unhandled,
            }
        }

        tracing::debug!(method = %request.method(), path = %request.uri().path(), "no route matched");
        write_json(
            StatusCode::NOT_FOUND,
            &json!({
                "message": format!("No route for {} {}", request.method(), request.uri().path())
            }),
        )
    }
}
