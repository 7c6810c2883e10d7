//! Shared state handed to every routed operation.

use std::sync::Arc;
use tokio_util::sync::{CancellationToken, DropGuard};

use super::authorizer::Authorizer;
use crate::oauth::Implementation;

#[derive(Clone)]
pub struct AppState {
    /// Operations the router dispatches to
    pub implementation: Arc<dyn Implementation>,
    /// Consulted before each operation
    pub authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    pub fn new(implementation: Arc<dyn Implementation>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            implementation,
            authorizer,
        }
    }
}

/// Cancellation scope for one request; cancelled when the guard drops.
pub(crate) fn request_scope() -> (CancellationToken, DropGuard) {
    let scope = CancellationToken::new();
    let guard = scope.clone().drop_guard();
    (scope, guard)
}
