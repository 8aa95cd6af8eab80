//! Structured logging.
//!
//! `RUST_LOG` wins when set; otherwise the configured directive is used.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor the config provides a valid one.
pub const DEFAULT_DIRECTIVE: &str = "ben10_mock_server=debug,tower_http=info";

/// Build the log filter from the environment, falling back to `configured`.
pub fn build_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global tracing subscriber.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing(configured: &str) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(configured))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
