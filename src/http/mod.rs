//! Request dispatch, authorization hook and response writing for the dummy OAuth endpoints.

pub mod authorizer;
pub mod context;
mod handler_token;
mod handler_well_known;
pub mod response;
pub mod router;
pub mod server;

pub use authorizer::{AuthorizationResult, Authorizer, PermissiveAuthorizer};
pub use context::AppState;
pub use router::{ApiRouter, Dispatch, MultiRouter, PartialRouter};
pub use server::{build_router, make_api_router};
