//! Startup orchestration.
//!
//! Order: metrics endpoint (optional) → bind listener (with fallback) →
//! signal listener → serve. Any startup error is fatal.

use thiserror::Error;

use crate::config::MockConfig;
use crate::http::MockServer;
use crate::lifecycle::signals::spawn_signal_listener;
use crate::lifecycle::Shutdown;
use crate::net::{bind_with_fallback, ListenerError};
use crate::observability::metrics;

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("invalid metrics address {0}")]
    MetricsAddress(String),

    #[error("failed to start metrics endpoint: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bind, serve and block until a stop signal arrives.
pub async fn launch(config: MockConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let listener = bind_with_fallback(&config.listener).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %format!("http://{local_addr}"),
        "Ben10 mock game server ready: auth, file, update and data endpoints"
    );
    tracing::info!("All requests are logged in detail; press Ctrl+C to stop");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_listener(shutdown);

    MockServer::new(config).run(listener, server_shutdown).await?;
    Ok(())
}
