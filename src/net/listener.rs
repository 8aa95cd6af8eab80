//! TCP listener binding with a privileged-port fallback.
//!
//! The game expects its backend on port 80. Binding that port needs
//! privileges, so when the OS refuses with `PermissionDenied` the server
//! retries exactly once on the fallback port. Any other bind error, or a
//! second failure, is fatal.

use std::future::Future;
use std::io;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind the primary address (fallback not attempted).
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Primary needed privileges and the fallback failed as well.
    #[error("failed to bind {primary} (permission denied) and fallback {fallback}: {source}")]
    Fallback {
        primary: String,
        fallback: String,
        #[source]
        source: io::Error,
    },
}

/// Bind the configured address, falling back once on `PermissionDenied`.
pub async fn bind_with_fallback(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    bind_using(config, |address| async move { TcpListener::bind(address).await }).await
}

/// Fallback logic over an arbitrary bind function.
pub async fn bind_using<T, F, Fut>(config: &ListenerConfig, mut bind: F) -> Result<T, ListenerError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = io::Result<T>>,
{
    let primary = config.primary_address();

    let err = match bind(primary.clone()).await {
        Ok(listener) => {
            tracing::info!(address = %primary, "Listener bound");
            return Ok(listener);
        }
        Err(err) => err,
    };

    let fallback = match config.fallback_address() {
        Some(fallback) if err.kind() == io::ErrorKind::PermissionDenied => fallback,
        _ => {
            return Err(ListenerError::Bind {
                address: primary,
                source: err,
            })
        }
    };

    tracing::warn!(
        primary = %primary,
        fallback = %fallback,
        error = %err,
        "Port needs elevated privileges, using fallback"
    );

    match bind(fallback.clone()).await {
        Ok(listener) => {
            tracing::info!(address = %fallback, "Listener bound on fallback");
            Ok(listener)
        }
        Err(source) => Err(ListenerError::Fallback {
            primary,
            fallback,
            source,
        }),
    }
}
