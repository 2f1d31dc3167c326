//! URL redirect server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request (GET /some-path)
//!         │
//!         ▼
//!   ┌────────────┐   miss   ┌────────────┐   miss   ┌────────────┐   miss   ┌────────────┐
//!   │ JSON list  │─────────▶│ YAML list  │─────────▶│ static map │─────────▶│   hello    │
//!   │ MapHandler │          │ MapHandler │          │ MapHandler │          │  handler   │
//!   └─────┬──────┘          └─────┬──────┘          └─────┬──────┘          └─────┬──────┘
//!         │ hit                   │ hit                   │ hit                   │
//!         ▼                       ▼                       ▼                       ▼
//!    302 Found               302 Found               302 Found          200 Hello, world!
//! ```
//!
//! Startup reads the settings file (optional), both redirect lists, builds
//! the chain and serves it. Any failure before the listener is bound is
//! fatal.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use url_redirect::config::{load_config, validate_config, ConfigError, ConfigOverrides, RedirectConfig};
use url_redirect::http::HttpServer;
use url_redirect::lifecycle::{load_chain, signals, Shutdown};
use url_redirect::observability::init_logging;

#[derive(Parser)]
#[command(name = "url-redirect")]
#[command(about = "Redirect request paths to URLs from YAML, JSON and static tables", long_about = None)]
struct Cli {
    /// TOML settings file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:8000.
    #[arg(short, long)]
    bind: Option<String>,

    /// YAML redirect list (`path` / `url` records).
    #[arg(long)]
    yaml: Option<PathBuf>,

    /// JSON redirect list (`path` / `URL` records).
    #[arg(long)]
    json: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind_address: self.bind.clone(),
            yaml_path: self.yaml.clone(),
            json_path: self.json.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<RedirectConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RedirectConfig::default(),
    };
    config.apply_overrides(cli.overrides());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    init_logging(&config.observability.log_level);

    tracing::info!("url-redirect v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        yaml_path = %config.sources.yaml_path.display(),
        json_path = %config.sources.json_path.display(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let chain = load_chain(&config).inspect_err(|e| {
        tracing::error!(error = %e, "Failed to build redirect chain");
    })?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, chain);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        signals::forward_signals(&shutdown).await;
    });
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
