//! Metrics collection and exposition.
//!
//! # Metrics
//! - `places_requests_total` (counter): requests by method, status, route
//! - `places_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Unmatched requests are labelled `route="none"` to bound cardinality
//! - Recording is a no-op until `init_metrics` installs the exporter

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener on `addr`.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("route", route.to_string()),
    ];
    metrics::counter!("places_requests_total", &labels).increment(1);
    metrics::histogram!("places_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}
