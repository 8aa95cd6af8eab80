//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. All problems are
//! collected so a bad file is reported in one pass.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::MockConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.port must not be 0")]
    ZeroPort,

    #[error("listener.fallback_port must not be 0")]
    ZeroFallbackPort,

    #[error("listener.fallback_port equals listener.port ({0})")]
    FallbackSameAsPrimary(u16),

    #[error("listener.host must not be empty")]
    EmptyHost,

    #[error("limits.max_body_size must be greater than 0")]
    ZeroBodyLimit,

    #[error("limits.request_timeout_secs must be greater than 0")]
    ZeroTimeout,

    #[error("observability.metrics_address is not a socket address: {0}")]
    InvalidMetricsAddress(String),
}

/// Check a configuration, returning every problem found.
pub fn validate_config(config: &MockConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    match config.listener.fallback_port {
        Some(0) => errors.push(ValidationError::ZeroFallbackPort),
        Some(port) if port == config.listener.port => {
            errors.push(ValidationError::FallbackSameAsPrimary(port));
        }
        _ => {}
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if config.limits.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
