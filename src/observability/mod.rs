//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields, no string formatting)
//!     → logging.rs (subscriber: env filter + fmt layer)
//!
//! HTTP layer adds:
//!     → tower_http TraceLayer spans per request
//!     → x-request-id correlation header
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` takes precedence over the configured level
//! - Metrics are out of scope for this service

pub mod logging;

pub use logging::init_logging;
