//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::tenancy::context::TENANT_HEADER;
use crate::tenancy::types::{demo_tenants, TenantRecord};

/// Root configuration for the telemetry service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Device discovery settings.
    pub discovery: DiscoveryConfig,

    /// Logging, tracing and metrics settings.
    pub observability: ObservabilityConfig,

    /// Tenant inventory served by the discovery API.
    pub tenants: Vec<TenantRecord>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            discovery: DiscoveryConfig::default(),
            observability: ObservabilityConfig::default(),
            tenants: demo_tenants(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Device discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Header carrying the tenant identifier.
    pub tenant_header: String,

    /// Simulated latency of the device fetch in milliseconds.
    pub fetch_delay_ms: u64,
}

impl DiscoveryConfig {
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            tenant_header: TENANT_HEADER.to_string(),
            fetch_delay_ms: 1000,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Where finished spans go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanExporterKind {
    /// OpenTelemetry stdout exporter, one record per finished span.
    Stdout,
    /// Spans are created but not exported.
    None,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Service name attached to exported spans.
    pub service_name: String,

    /// Name of the tracer handed to handlers.
    pub tracer_name: String,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    pub span_exporter: SpanExporterKind,

    /// How long shutdown waits for the span provider to flush.
    pub shutdown_timeout_ms: u64,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "multi-tenant-telemetry-service".to_string(),
            tracer_name: "my-application-tracer".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            span_exporter: SpanExporterKind::Stdout,
            shutdown_timeout_ms: 5000,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
