//! Process-wide telemetry lifecycle.
//!
//! # States
//! ```text
//! Uninitialized → Started → ShuttingDown → Terminated
//! ```
//!
//! `start()` must happen before the HTTP listener accepts traffic so every
//! request is traced. `shutdown()` flushes and shuts down the span provider
//! within the configured deadline. Nothing leaves `Terminated`.

use opentelemetry::trace::TracerProvider;
use opentelemetry_sdk::error::OTelSdkError;
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider, SpanExporter};
use opentelemetry_sdk::Resource;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time;

use crate::config::{ObservabilityConfig, SpanExporterKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryState {
    Uninitialized,
    Started,
    ShuttingDown,
    Terminated,
}

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("telemetry cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        from: TelemetryState,
        to: TelemetryState,
    },
    #[error("span provider did not shut down within {0:?}")]
    ShutdownTimeout(Duration),
    #[error("span provider shutdown failed: {0}")]
    Provider(#[from] OTelSdkError),
    #[error("span provider shutdown task failed: {0}")]
    ShutdownTask(#[from] tokio::task::JoinError),
    #[error("failed to install log subscriber: {0}")]
    Subscriber(String),
}

/// Owner of the span provider for the life of the process.
pub struct Telemetry {
    service_name: String,
    tracer_name: String,
    shutdown_timeout: Duration,
    exporting: bool,
    provider: SdkTracerProvider,
    state: Mutex<TelemetryState>,
}

impl Telemetry {
    /// Create an uninitialized telemetry handle exporting to `exporter`.
    pub fn new<E>(config: &ObservabilityConfig, exporter: E) -> Self
    where
        E: SpanExporter + 'static,
    {
        let provider = SdkTracerProvider::builder()
            .with_resource(resource(config))
            .with_simple_exporter(exporter)
            .build();
        Self::build(config, provider, true)
    }

    /// Create a telemetry handle using the exporter named in `config`.
    pub fn from_config(config: &ObservabilityConfig) -> Self {
        match config.span_exporter {
            SpanExporterKind::Stdout => {
                Self::new(config, opentelemetry_stdout::SpanExporter::default())
            }
            SpanExporterKind::None => {
                let provider = SdkTracerProvider::builder()
                    .with_resource(resource(config))
                    .build();
                Self::build(config, provider, false)
            }
        }
    }

    fn build(config: &ObservabilityConfig, provider: SdkTracerProvider, exporting: bool) -> Self {
        Self {
            service_name: config.service_name.clone(),
            tracer_name: config.tracer_name.clone(),
            shutdown_timeout: Duration::from_millis(config.shutdown_timeout_ms),
            exporting,
            provider,
            state: Mutex::new(TelemetryState::Uninitialized),
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn tracer_name(&self) -> &str {
        &self.tracer_name
    }

    /// Whether finished spans leave the process.
    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    pub fn state(&self) -> TelemetryState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start collecting spans and return the tracer handlers should use.
    pub fn start(&self) -> Result<SdkTracer, TelemetryError> {
        self.transition(TelemetryState::Uninitialized, TelemetryState::Started)?;
        Ok(self.provider.tracer(self.tracer_name.clone()))
    }

    /// Flush pending spans and shut the provider down.
    ///
    /// The handle ends in `Terminated` whether or not this succeeds.
    pub async fn shutdown(&self) -> Result<(), TelemetryError> {
        self.transition(TelemetryState::Started, TelemetryState::ShuttingDown)?;

        // Provider shutdown blocks on the exporter.
        let provider = self.provider.clone();
        let flush = tokio::task::spawn_blocking(move || provider.shutdown());

        let result = match time::timeout(self.shutdown_timeout, flush).await {
            Ok(Ok(flushed)) => flushed.map_err(TelemetryError::from),
            Ok(Err(e)) => Err(TelemetryError::ShutdownTask(e)),
            Err(_) => Err(TelemetryError::ShutdownTimeout(self.shutdown_timeout)),
        };

        self.set_state(TelemetryState::Terminated);
        result
    }

    fn transition(&self, from: TelemetryState, to: TelemetryState) -> Result<(), TelemetryError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != from {
            return Err(TelemetryError::InvalidTransition { from: *state, to });
        }
        *state = to;
        Ok(())
    }

    fn set_state(&self, to: TelemetryState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = to;
    }
}

fn resource(config: &ObservabilityConfig) -> Resource {
    Resource::builder()
        .with_service_name(config.service_name.clone())
        .build()
}
