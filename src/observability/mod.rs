//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! telemetry.rs (lifecycle: start → shutdown of the OpenTelemetry provider)
//!     → hands out the SdkTracer injected into handlers
//!     → span.rs (request root span carried in request extensions)
//!
//! Alongside:
//!     → logging.rs (tracing subscriber, bridged into the same provider)
//!     → metrics.rs (counters, histograms, optional Prometheus endpoint)
//! ```
//!
//! # Design Decisions
//! - Telemetry starts before the listener binds; shutdown flushes spans last
//! - The tracer is injected into handlers, never read from a global
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
pub mod span;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod testing;

pub use span::RequestSpan;
pub use telemetry::{Telemetry, TelemetryError, TelemetryState};
