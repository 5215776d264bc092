//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dbroute_probe_total` (counter): probes by outcome
//! - `dbroute_probe_duration_seconds` (histogram): probe latency
//! - `dbroute_active_backend` (gauge): 0=primary, 1=secondary
//! - `dbroute_failovers_total` (counter): monitor-driven routing changes by target
//! - `dbroute_overrides_total` (counter): operator actions
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::Backend;

/// Install the Prometheus exporter and describe all metrics.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_counter!("dbroute_probe_total", "Primary health probes by outcome");
    describe_histogram!("dbroute_probe_duration_seconds", "Primary health probe duration in seconds");
    describe_gauge!("dbroute_active_backend", "Current routing target (0=primary, 1=secondary)");
    describe_counter!("dbroute_failovers_total", "Routing changes made by the health monitor");
    describe_counter!("dbroute_overrides_total", "Operator override actions");

    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_probe(ok: bool, elapsed: Duration) {
    let outcome = if ok { "healthy" } else { "unhealthy" };
    counter!("dbroute_probe_total", "outcome" => outcome).increment(1);
    histogram!("dbroute_probe_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn set_active_backend(backend: Backend) {
    gauge!("dbroute_active_backend").set(backend as u8 as f64);
}

pub fn record_failover(to: Backend) {
    counter!("dbroute_failovers_total", "to" => to.as_str()).increment(1);
}

pub fn record_override(action: &'static str) {
    counter!("dbroute_overrides_total", "action" => action).increment(1);
}
