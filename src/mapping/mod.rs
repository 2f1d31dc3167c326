//! Path-to-URL mapping subsystem.
//!
//! # Data Flow
//! ```text
//! YAML / JSON blob (bytes)
//!     → format.rs (decode list of {path, url} records)
//!     → record.rs (PathUrl, transient)
//!     → store.rs (MappingStore, last write wins)
//!     → handed to routing::chain as an immutable lookup table
//! ```
//!
//! # Design Decisions
//! - One generic decoder; formats differ only by descriptor
//! - Field values are taken as-is (no URL validation, no path normalization)
//! - Stores are frozen after construction and shared read-only

pub mod format;
pub mod record;
pub mod store;

pub use format::{parse_records, DecodeError, Json, RecordFormat, Yaml};
pub use record::PathUrl;
pub use store::MappingStore;
