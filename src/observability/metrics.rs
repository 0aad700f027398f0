//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bazaar_requests_total` (counter): requests by method, route, status
//! - `bazaar_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Labels use the route template, not the raw path, to bound cardinality
//! - Exporter runs on its own address so the API port stays clean

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter started");
        }
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to start metrics exporter");
        }
    }
}

/// Record one finished request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];

    metrics::counter!("bazaar_requests_total", &labels).increment(1);
    metrics::histogram!("bazaar_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}
