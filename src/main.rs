//! Multi-tenant telemetry service (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────┐
//!                       │                TELEMETRY SERVICE                  │
//!                       │                                                   │
//!     Client Request    │  ┌──────────┐   ┌──────────────┐   ┌───────────┐  │
//!     ──────────────────┼─▶│ request  │──▶│ request span │──▶│  tenant   │  │
//!                       │  │   id     │   │  middleware  │   │  context  │  │
//!                       │  └──────────┘   └──────────────┘   └─────┬─────┘  │
//!                       │                                          │        │
//!                       │                                          ▼        │
//!     Client Response   │                 ┌──────────────┐   ┌───────────┐  │
//!     ◀─────────────────┼─────────────────│   handlers   │◀──│ discovery │  │
//!                       │                 │ (JSON / 404) │   │  engine   │  │
//!                       │                 └──────────────┘   └───────────┘  │
//!                       │                                                   │
//!                       │  ┌─────────────────────────────────────────────┐  │
//!                       │  │ telemetry (spans, exporter) · config · logs │  │
//!                       │  └─────────────────────────────────────────────┘  │
//!                       └──────────────────────────────────────────────────┘
//! ```
//!
//! The binary runs on a current-thread runtime: requests interleave at
//! their single suspension point, the simulated device fetch.

use clap::Parser;
use std::path::PathBuf;

use tenant_telemetry::config::{load_config, validate_config, ConfigError, ServiceConfig};
use tenant_telemetry::lifecycle::{bind, termination_signal, Service, Shutdown};
use tenant_telemetry::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "tenant-telemetry")]
#[command(about = "Multi-tenant device telemetry service", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind_address) = args.bind {
        config.listener.bind_address = bind_address;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    // Telemetry must be running before the listener can accept a request,
    // and before logging so `tracing` spans can be bridged into it.
    let service = Service::initialize(config)?;
    logging::init_logging(&service.config().observability, service.tracer().clone())?;

    let config = service.config();
    tracing::info!("tenant-telemetry v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        tenants = config.tenants.len(),
        fetch_delay_ms = config.discovery.fetch_delay_ms,
        "Configuration loaded"
    );
    tracing::info!(
        service.name = %service.telemetry().service_name(),
        tracer = %service.telemetry().tracer_name(),
        exporting = service.telemetry().is_exporting(),
        "Telemetry started"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = bind(&service.config().listener).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(address = %local_addr, "Server is running");
    tracing::info!(
        "Use `curl -H \"X-Tenant-ID: tenant-a\" http://{}/api/v1/fabric/discover` to test",
        local_addr
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        match termination_signal().await {
            Ok(signal) => {
                tracing::info!(signal = %signal, "Termination signal received");
                shutdown.trigger();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handlers");
                // Dropping the coordinator would read as a shutdown request.
                std::future::pending::<()>().await;
            }
        }
    });

    service.serve(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
