//! Configuration schema definitions.
//!
//! Every section has defaults matching the legacy server, so an empty file
//! (or no file at all) reproduces its behavior: port 80, then 8080.

use serde::{Deserialize, Serialize};

/// Root configuration for the mock server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MockConfig {
    /// Listener configuration (host, primary and fallback port).
    pub listener: ListenerConfig,

    /// Request size and time limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host to bind (e.g., "127.0.0.1").
    pub host: String,

    /// Port tried first.
    pub port: u16,

    /// Port tried once when the primary port needs privileges we lack.
    /// `None` disables the fallback.
    pub fallback_port: Option<u16>,
}

impl ListenerConfig {
    /// Address string for the primary port.
    pub fn primary_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Address string for the fallback port, if any.
    pub fn fallback_address(&self) -> Option<String> {
        self.fallback_port.map(|port| format!("{}:{}", self.host, port))
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 80,
            fallback_port: Some(8080),
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest request body read into memory, in bytes.
    /// Larger bodies are treated as empty.
    pub max_body_size: usize,

    /// Total time allowed per request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "ben10_mock_server=debug,tower_http=info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
