//! Startup orchestration.
//!
//! # Responsibilities
//! - Start telemetry before anything can create spans
//! - Build the HTTP server around the started tracer
//! - Serve until shutdown, then drain telemetry
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Two phases: `initialize` (telemetry) strictly before `serve` (listener)
//! - A telemetry shutdown failure is logged, never turned into a serve error

use opentelemetry_sdk::trace::{SdkTracer, SpanExporter};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::{ConfigError, ListenerConfig, ServiceConfig};
use crate::http::HttpServer;
use crate::observability::telemetry::{Telemetry, TelemetryError};
use crate::tenancy::source::DeviceSource;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// A service whose telemetry is running and which is ready to serve.
pub struct Service {
    config: ServiceConfig,
    telemetry: Telemetry,
    tracer: SdkTracer,
    source: Option<Arc<dyn DeviceSource>>,
}

impl Service {
    /// Phase one: start telemetry with the exporter named in config.
    pub fn initialize(config: ServiceConfig) -> Result<Self, StartupError> {
        let telemetry = Telemetry::from_config(&config.observability);
        Self::with_telemetry(config, telemetry)
    }

    /// Phase one with an explicit span exporter.
    pub fn with_exporter<E>(config: ServiceConfig, exporter: E) -> Result<Self, StartupError>
    where
        E: SpanExporter + 'static,
    {
        let telemetry = Telemetry::new(&config.observability, exporter);
        Self::with_telemetry(config, telemetry)
    }

    fn with_telemetry(config: ServiceConfig, telemetry: Telemetry) -> Result<Self, StartupError> {
        let tracer = telemetry.start()?;
        Ok(Self {
            config,
            telemetry,
            tracer,
            source: None,
        })
    }

    /// Replace the default delayed device source.
    pub fn with_device_source(mut self, source: Arc<dyn DeviceSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn tracer(&self) -> &SdkTracer {
        &self.tracer
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Phase two: serve on `listener` until `shutdown` fires, then shut
    /// telemetry down.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<Telemetry, StartupError> {
        let server = match self.source {
            Some(source) => HttpServer::with_source(self.config, self.tracer, source),
            None => HttpServer::new(self.config, self.tracer),
        };
        let served = server.run(listener, shutdown).await;

        match self.telemetry.shutdown().await {
            Ok(()) => tracing::info!("Tracing terminated"),
            Err(e) => tracing::error!(error = %e, "Error terminating tracing"),
        }

        served?;
        Ok(self.telemetry)
    }
}

/// Bind the TCP listener named in `config`.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, StartupError> {
    let bind_error = |source| StartupError::Bind {
        address: config.bind_address.clone(),
        source,
    };
    let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
        bind_error(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
    })?;
    TcpListener::bind(addr).await.map_err(bind_error)
}
