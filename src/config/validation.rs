//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, header names and log levels
//! - Check tenant and device identifiers for uniqueness
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use axum::http::HeaderName;
use std::collections::HashSet;
use std::net::SocketAddr;
use tracing_subscriber::filter::LevelFilter;

use crate::config::schema::ServiceConfig;
use crate::tenancy::context::UNKNOWN_TENANT;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid {field} address: {value}")]
    InvalidAddress { field: &'static str, value: String },
    #[error("invalid tenant header name: {0}")]
    InvalidHeader(String),
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
    #[error("tenant at index {0} has an empty id")]
    EmptyTenantId(usize),
    #[error("duplicate tenant id: {0}")]
    DuplicateTenant(String),
    #[error("tenant id '{0}' is reserved for requests without a tenant header")]
    ReservedTenantId(String),
    #[error("tenant '{tenant}' has duplicate device id: {device}")]
    DuplicateDevice { tenant: String, device: String },
}

/// Check `config` for semantic errors.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener",
            value: config.listener.bind_address.clone(),
        });
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "metrics",
            value: observability.metrics_address.clone(),
        });
    }

    if observability.log_level.parse::<LevelFilter>().is_err() {
        errors.push(ValidationError::InvalidLogLevel(observability.log_level.clone()));
    }

    if HeaderName::from_bytes(config.discovery.tenant_header.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidHeader(
            config.discovery.tenant_header.clone(),
        ));
    }

    let mut tenant_ids = HashSet::new();
    for (index, tenant) in config.tenants.iter().enumerate() {
        if tenant.id.is_empty() {
            errors.push(ValidationError::EmptyTenantId(index));
            continue;
        }
        if tenant.id == UNKNOWN_TENANT {
            errors.push(ValidationError::ReservedTenantId(tenant.id.clone()));
        }
        if !tenant_ids.insert(tenant.id.as_str()) {
            errors.push(ValidationError::DuplicateTenant(tenant.id.clone()));
        }

        let mut device_ids = HashSet::new();
        for device in &tenant.devices {
            if !device_ids.insert(device.id.as_str()) {
                errors.push(ValidationError::DuplicateDevice {
                    tenant: tenant.id.clone(),
                    device: device.id.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
