//! Metrics collection and exposition.
//!
//! # Metrics
//! - `discover_requests_total` (counter): discovery requests by outcome
//! - `discover_request_duration_seconds` (histogram): discovery latency by outcome
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Outcome label only; tenant ids are unbounded and stay out of labels

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Outcome label for discovery metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    Found,
    TenantNotFound,
}

impl DiscoveryOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryOutcome::Found => "found",
            DiscoveryOutcome::TenantNotFound => "tenant_not_found",
        }
    }
}

/// Install the Prometheus recorder with an HTTP scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished discovery request.
pub fn record_discovery(outcome: DiscoveryOutcome, start: Instant) {
    let label = outcome.as_str();
    counter!("discover_requests_total", "outcome" => label).increment(1);
    histogram!("discover_request_duration_seconds", "outcome" => label)
        .record(start.elapsed().as_secs_f64());
}
