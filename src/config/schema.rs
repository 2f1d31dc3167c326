//! Configuration schema definitions.
//!
//! This module defines the complete settings structure for the redirect
//! server. All types derive Serde traits for deserialization from TOML.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the redirect server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Locations of the YAML and JSON redirect lists.
    pub sources: SourcesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Static path table consulted after the YAML and JSON lists.
    pub paths: BTreeMap<String, String>,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            sources: SourcesConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            paths: default_paths(),
        }
    }
}

fn default_paths() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "/urlshort-godoc".to_string(),
            "https://godoc.org/github.com/gophercises/urlshort".to_string(),
        ),
        (
            "/yaml-godoc".to_string(),
            "https://godoc.org/gopkg.in/yaml.v2".to_string(),
        ),
    ])
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Redirect list locations, relative to the working directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// YAML list of `path` / `url` records.
    pub yaml_path: PathBuf,

    /// JSON array of `path` / `URL` records.
    pub json_path: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            yaml_path: PathBuf::from("inputs/urls.yaml"),
            json_path: PathBuf::from("inputs/urls.json"),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Command-line values that take precedence over the loaded file.
///
/// Only `Some` fields override.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub bind_address: Option<String>,
    pub yaml_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl RedirectConfig {
    /// Apply command-line overrides in place.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(bind_address) = overrides.bind_address {
            self.listener.bind_address = bind_address;
        }
        if let Some(yaml_path) = overrides.yaml_path {
            self.sources.yaml_path = yaml_path;
        }
        if let Some(json_path) = overrides.json_path {
            self.sources.json_path = json_path;
        }
        if let Some(log_level) = overrides.log_level {
            self.observability.log_level = log_level;
        }
    }
}
