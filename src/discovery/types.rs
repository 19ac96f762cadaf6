//! Discovery response and error types.

use serde::{Deserialize, Serialize};

use crate::tenancy::types::{DeviceRecord, DeviceStatus};

/// Device as exposed by the discovery API. Address and class stay internal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSummary {
    pub id: String,
    pub status: DeviceStatus,
}

impl From<&DeviceRecord> for DeviceSummary {
    fn from(device: &DeviceRecord) -> Self {
        Self {
            id: device.id.clone(),
            status: device.status,
        }
    }
}

/// Body of a successful discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTelemetryResponse {
    pub tenant_id: String,
    pub devices: Vec<DeviceSummary>,
}

impl DeviceTelemetryResponse {
    /// Project `devices` to summaries, keeping their order.
    pub fn new(tenant_id: impl Into<String>, devices: &[DeviceRecord]) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            devices: devices.iter().map(DeviceSummary::from).collect(),
        }
    }
}

/// The single domain failure of discovery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Tenant ID not found: {0}")]
    TenantNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tenancy::types::demo_tenants;

    #[test]
    fn test_response_projection_and_shape() {
        let tenant = &demo_tenants()[0];
        let response = DeviceTelemetryResponse::new(&tenant.id, &tenant.devices);

        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"tenantId":"tenant-a","devices":[{"id":"dev1-A","status":"online"},{"id":"dev2-A","status":"offline"}]}"#
        );
    }

    #[test]
    fn test_error_message_names_tenant() {
        let err = DiscoveryError::TenantNotFound("tenant-c".into());
        assert_eq!(err.to_string(), "Tenant ID not found: tenant-c");
    }
}
