//! Redirect routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → chain.rs (MapHandler: exact lookup in its MappingStore)
//!         hit  → 302 Found, Location = mapped URL
//!         miss → fallback.handle(request), unmodified
//!     → ... next MapHandler ...
//!     → handler.rs (HelloHandler terminates the chain)
//!
//! Chain Compilation (at startup):
//!     static paths, YAML blob, JSON blob
//!     → MappingStore per source
//!     → MapHandlers nested innermost-first
//!     → Freeze as one immutable entry point
//! ```
//!
//! # Design Decisions
//! - Handlers are immutable after construction (thread-safe without locks)
//! - Fallbacks are shared via `Arc`; a handler never owns its successor exclusively
//! - A miss is not an error: it is full delegation, including the response

pub mod chain;
pub mod handler;

pub use chain::{format_handler, json_handler, map_handler, yaml_handler, MapHandler};
pub use handler::{Handler, HelloHandler, SharedHandler};
