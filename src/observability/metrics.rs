//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mock_requests_total` (counter): requests by method and category
//! - `mock_request_duration_seconds` (histogram): handling time by category
//!
//! Recording is always on and costs nothing without an installed
//! recorder. The Prometheus endpoint is opt-in.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one answered request.
pub fn record_request(method: &'static str, category: &'static str, start_time: Instant) {
    ::metrics::counter!(
        "mock_requests_total",
        "method" => method,
        "category" => category
    )
    .increment(1);

    ::metrics::histogram!("mock_request_duration_seconds", "category" => category)
        .record(start_time.elapsed().as_secs_f64());
}
