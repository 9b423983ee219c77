//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): intercepted requests by mode
//! - `relay_render_total` (counter): render calls by outcome
//! - `relay_render_duration_seconds` (histogram): render call latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_relay_mode(mode: &'static str) {
    metrics::counter!("relay_requests_total", "mode" => mode).increment(1);
}

pub fn record_render(outcome: &'static str, start_time: Instant) {
    metrics::counter!("relay_render_total", "outcome" => outcome).increment(1);
    metrics::histogram!("relay_render_duration_seconds", "outcome" => outcome)
        .record(start_time.elapsed().as_secs_f64());
}
