//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use tokio::net::TcpListener;
use url_redirect::config::RedirectConfig;
use url_redirect::http::HttpServer;
use url_redirect::lifecycle::{load_chain, Shutdown};

/// A running server plus the handle that stops it.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Write both redirect lists into `dir` and return a config pointing at them.
pub fn write_sources(dir: &Path, yaml: &str, json: &str) -> RedirectConfig {
    let mut config = RedirectConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.sources.yaml_path = dir.join("urls.yaml");
    config.sources.json_path = dir.join("urls.json");
    std::fs::write(&config.sources.yaml_path, yaml).unwrap();
    std::fs::write(&config.sources.json_path, json).unwrap();
    config
}

/// Build the chain from `config` and serve it on an ephemeral port.
#[allow(dead_code)]
pub async fn start_server(config: RedirectConfig) -> TestServer {
    let chain = load_chain(&config).unwrap();
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(&config, chain);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer { addr, shutdown }
}

/// HTTP client that reports redirects instead of following them.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
