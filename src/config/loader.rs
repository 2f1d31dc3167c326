//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::RedirectConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A redirect source file could not be read.
#[derive(Debug, Error)]
#[error("failed to read redirect source {}: {source}", .path.display())]
pub struct ConfigReadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RedirectConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RedirectConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Read a redirect list file into memory.
pub fn read_source(path: &Path) -> Result<Vec<u8>, ConfigReadError> {
    fs::read(path).map_err(|source| ConfigReadError {
        path: path.to_path_buf(),
        source,
    })
}
