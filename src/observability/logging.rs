//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global log subscriber once at startup
//! - Pick the output format and level from config
//!
//! # Design Decisions
//! - Uses tracing-subscriber with an EnvFilter; `RUST_LOG` overrides config
//! - JSON format for production, pretty format for development
//! - `tracing` spans are exported through the same OpenTelemetry tracer as
//!   the request spans, so both land in one trace

use opentelemetry_sdk::trace::SdkTracer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};
use crate::observability::telemetry::TelemetryError;

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(level: &str) -> String {
    format!("tenant_telemetry={level},tower_http={level}", level = level)
}

/// Install the global log subscriber, bridging `tracing` spans to `tracer`.
pub fn init_logging(config: &ObservabilityConfig, tracer: SdkTracer) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&config.log_level)));

    let json = config.log_format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .try_init()
        .map_err(|e| TelemetryError::Subscriber(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("debug"), "tenant_telemetry=debug,tower_http=debug");
    }
}
