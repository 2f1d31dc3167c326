//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → schema.rs (defaults, CLI overrides)
//!     → validation.rs (semantic checks)
//!     → RedirectConfig (validated, immutable)
//!
//! redirect sources (YAML / JSON)
//!     → loader.rs::read_source (raw bytes for the mapping parsers)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload while serving
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, read_source, ConfigError, ConfigReadError};
pub use schema::{
    ConfigOverrides, ListenerConfig, ObservabilityConfig, RedirectConfig, SourcesConfig,
    TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
