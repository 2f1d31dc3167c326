//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request id + trace span + timeout
//!     → routing chain (redirect or delegate, see routing::chain)
//!     → Send to client
//! ```

pub mod server;

pub use server::{HttpServer, X_REQUEST_ID};
