//! Startup orchestration.
//!
//! # Responsibilities
//! - Read the YAML and JSON redirect sources
//! - Compose the handler chain: default ← static map ← YAML ← JSON
//!
//! # Design Decisions
//! - Fail fast: an unreadable or malformed source is fatal
//! - The static table is passed in explicitly, never read from a global

use std::sync::Arc;

use thiserror::Error;

use crate::config::{read_source, ConfigReadError, RedirectConfig};
use crate::mapping::{DecodeError, MappingStore};
use crate::routing::{json_handler, map_handler, yaml_handler, HelloHandler, SharedHandler};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Read(#[from] ConfigReadError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Compose the redirect chain from already-loaded sources.
///
/// Lookup order for a request is JSON, then YAML, then `static_paths`,
/// then the hello handler.
pub fn build_chain(
    static_paths: MappingStore,
    yaml: &[u8],
    json: &[u8],
) -> Result<SharedHandler, StartupError> {
    let static_entries = static_paths.len();
    let hello: SharedHandler = Arc::new(HelloHandler);
    let map: SharedHandler = Arc::new(map_handler(static_paths, hello));

    let yaml = yaml_handler(yaml, map)?;
    let yaml_entries = yaml.store().len();

    let json = json_handler(json, Arc::new(yaml))?;
    let json_entries = json.store().len();

    tracing::info!(
        static_entries,
        yaml_entries,
        json_entries,
        "Redirect chain built"
    );

    Ok(Arc::new(json))
}

/// Read both sources named in `config` and compose the chain.
pub fn load_chain(config: &RedirectConfig) -> Result<SharedHandler, StartupError> {
    let yaml = read_source(&config.sources.yaml_path)?;
    let json = read_source(&config.sources.json_path)?;

    tracing::debug!(
        yaml_path = %config.sources.yaml_path.display(),
        json_path = %config.sources.json_path.display(),
        "Redirect sources read"
    );

    build_chain(config.paths.iter().collect(), &yaml, &json)
}
