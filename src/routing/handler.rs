//! The request handler abstraction and the terminal default handler.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};

/// A link in the redirect chain.
pub trait Handler: Send + Sync + std::fmt::Debug {
    /// Produce the response for `request`, either directly or by delegating.
    fn handle(&self, request: Request<Body>) -> Response;
}

/// A handler reference that can be shared between several chains.
pub type SharedHandler = Arc<dyn Handler>;

/// Body served when no handler in the chain knows the path.
pub const HELLO_BODY: &str = "Hello, world!\n";

/// Terminal handler: answers every request with `200 Hello, world!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelloHandler;

impl Handler for HelloHandler {
    fn handle(&self, _request: Request<Body>) -> Response {
        (StatusCode::OK, HELLO_BODY).into_response()
    }
}
