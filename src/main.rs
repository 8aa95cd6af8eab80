//! Ben10 mock game server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Game client                ┌────────────────────────────────────────────┐
//!     ───────────────────────────┼─▶ net::listener (port 80, fallback 8080)   │
//!                                │        │                                   │
//!                                │        ▼                                   │
//!                                │   http::server ──▶ http::request (log)     │
//!                                │        │                                   │
//!                                │        ▼                                   │
//!                                │   routing::Classifier ──▶ Category         │
//!                                │        │                                   │
//!                                │        ▼                                   │
//!     ◀──────────────────────────┼── http::response (+ http::auth/multipart)  │
//!                                └────────────────────────────────────────────┘
//! ```
//!
//! With no arguments the server behaves like the legacy backend: it tries
//! port 80 and falls back to 8080 when that needs root.

use clap::Parser;
use std::path::PathBuf;

use ben10_mock_server::config::{load_config, validate_config, ConfigError, MockConfig};
use ben10_mock_server::lifecycle::launch;
use ben10_mock_server::observability::logging::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "ben10-mock-server")]
#[command(about = "Mock backend answering the Ben10 game's HTTP requests", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind.
    #[arg(long)]
    host: Option<String>,

    /// Primary port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Port used when the primary port needs privileges.
    #[arg(long, conflicts_with = "no_fallback")]
    fallback_port: Option<u16>,

    /// Fail instead of falling back when the primary port is refused.
    #[arg(long)]
    no_fallback: bool,
}

impl Cli {
    fn apply(&self, config: &mut MockConfig) {
        if let Some(host) = &self.host {
            config.listener.host = host.clone();
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(port) = self.fallback_port {
            config.listener.fallback_port = Some(port);
        }
        if self.no_fallback {
            config.listener.fallback_port = None;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MockConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_tracing(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.listener.host,
        port = config.listener.port,
        fallback_port = ?config.listener.fallback_port,
        "ben10-mock-server starting"
    );

    launch(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
