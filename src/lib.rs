//! Path-based URL redirect service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod mapping;
pub mod observability;
pub mod routing;

pub use config::RedirectConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use mapping::{DecodeError, MappingStore, PathUrl};
pub use routing::{Handler, MapHandler, SharedHandler};
