//! Metrics collection and exposition.
//!
//! # Metrics
//! - `rpc_proxy_requests_total` (counter): inbound proxy requests by outcome
//! - `rpc_proxy_request_duration_seconds` (histogram): end-to-end latency by outcome
//! - `rpc_proxy_upstream_attempts_total` (counter): attempts by upstream and outcome
//!
//! Recording is a no-op until `init_metrics` installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a finished inbound request.
pub fn record_request(outcome: &'static str, start: Instant) {
    metrics::counter!("rpc_proxy_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("rpc_proxy_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record one forwarding attempt against an upstream.
pub fn record_attempt(upstream: &str, outcome: &'static str) {
    metrics::counter!(
        "rpc_proxy_upstream_attempts_total",
        "upstream" => upstream.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}
