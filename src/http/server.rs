//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router that hands every request to the redirect chain
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RedirectConfig;
use crate::routing::SharedHandler;

/// Correlation header set on every request and echoed on every response.
pub const X_REQUEST_ID: &str = "x-request-id";

/// HTTP server for the redirect chain.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server that dispatches every request into `chain`.
    pub fn new(config: &RedirectConfig, chain: SharedHandler) -> Self {
        let routes = Router::new().fallback(dispatch).with_state(chain);
        let router = with_middleware(routes, Duration::from_secs(config.timeouts.request_secs));
        Self { router }
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Wrap `routes` with request IDs, tracing and a per-request timeout (408).
#[allow(deprecated)]
fn with_middleware(routes: Router, request_timeout: Duration) -> Router {
    routes
        .layer(TimeoutLayer::new(request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Every path, every method: the chain decides.
async fn dispatch(State(chain): State<SharedHandler>, request: Request<Body>) -> Response {
    chain.handle(request)
}
