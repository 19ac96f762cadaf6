//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(
        "Validation failed: {}",
        .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    )]
    Validation(Vec<ValidationError>),
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    let config: ServiceConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{LogFormat, SpanExporterKind};
    use crate::tenancy::types::{DeviceClass, DeviceStatus};

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
        assert_eq!(config.discovery.tenant_header, "x-tenant-id");
        assert_eq!(config.discovery.fetch_delay_ms, 1000);
        assert_eq!(config.observability.span_exporter, SpanExporterKind::Stdout);
        assert_eq!(config.tenants.len(), 2);
    }

    #[test]
    fn test_full_config() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:8080"

            [discovery]
            tenant_header = "x-org-id"
            fetch_delay_ms = 50

            [observability]
            log_format = "json"
            span_exporter = "none"

            [[tenants]]
            id = "tenant-z"
            name = "Tenant Z"
            devices = [
                { id = "edge-1", ip = "172.16.0.1", type = "router", status = "online" },
                { id = "edge-2", ip = "fd00::2", type = "access-point", status = "offline" },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.discovery.tenant_header, "x-org-id");
        assert_eq!(config.discovery.fetch_delay().as_millis(), 50);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.span_exporter, SpanExporterKind::None);
        assert_eq!(config.observability.service_name, "multi-tenant-telemetry-service");

        assert_eq!(config.tenants.len(), 1);
        let devices = &config.tenants[0].devices;
        assert_eq!(devices[0].device_type, DeviceClass::Router);
        assert_eq!(devices[1].device_type, DeviceClass::Other("access-point".into()));
        assert_eq!(devices[1].status, DeviceStatus::Offline);
        assert!(devices[1].ip.is_ipv6());
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[listener]\nbind_address = 3000").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_lists_every_problem() {
        let err = parse_config(
            r#"
            [[tenants]]
            id = "unknown-tenant"
            name = "Sentinel"

            [[tenants]]
            id = "unknown-tenant"
            name = "Sentinel again"
            "#,
        )
        .unwrap_err();

        match &err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("Validation failed: "));
        assert!(err.to_string().contains("duplicate tenant id"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/tenant-telemetry.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
