//! Metrics collection and exposition.
//!
//! # Metrics
//! - `wallet_toggle_total` (counter): toggle actions by `action`
//! - `wallet_symbol_reads_total` (counter): symbol reads by `outcome`
//! - `wallet_probes_total` (counter): probe runs by `outcome`
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_toggle(action: &'static str) {
    counter!("wallet_toggle_total", "action" => action).increment(1);
}

pub fn record_symbol_read(outcome: &'static str) {
    counter!("wallet_symbol_reads_total", "outcome" => outcome).increment(1);
}

pub fn record_probe(outcome: &'static str) {
    counter!("wallet_probes_total", "outcome" => outcome).increment(1);
}
