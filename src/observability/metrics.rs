//! Metrics collection and exposition.
//!
//! # Metrics
//! - `webhook_auth_decisions_total` (counter): authentication outcomes by reason
//! - `webhook_requests_total` (counter): responses by status
//! - `webhook_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Labels never carry header values or digests

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::auth::AuthReason;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_auth_decision(reason: AuthReason) {
    ::metrics::counter!("webhook_auth_decisions_total", "reason" => reason.as_str()).increment(1);
}

pub fn record_request(status: u16, start: Instant) {
    ::metrics::counter!("webhook_requests_total", "status" => status.to_string()).increment(1);
    ::metrics::histogram!("webhook_request_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}
