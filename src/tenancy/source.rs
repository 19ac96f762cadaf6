//! Device data sources.
//!
//! Discovery awaits exactly one fetch per request. The default source stands
//! in for a database round trip with a fixed delay on the tokio timer, so a
//! pending fetch never blocks other requests on the same thread.

use async_trait::async_trait;
use std::time::Duration;

use crate::tenancy::types::{DeviceRecord, TenantRecord};

/// Asynchronous capability returning the devices of a tenant.
#[async_trait]
pub trait DeviceSource: Send + Sync {
    async fn fetch_devices(&self, tenant: &TenantRecord) -> Vec<DeviceRecord>;
}

/// Serves the tenant's configured devices after a fixed delay.
#[derive(Debug, Clone)]
pub struct DelayedDeviceSource {
    delay: Duration,
}

impl DelayedDeviceSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl DeviceSource for DelayedDeviceSource {
    async fn fetch_devices(&self, tenant: &TenantRecord) -> Vec<DeviceRecord> {
        tokio::time::sleep(self.delay).await;
        tenant.devices.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tenancy::types::demo_tenants;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_delayed_source_waits_then_returns_devices() {
        let tenant = &demo_tenants()[0];
        let source = DelayedDeviceSource::new(Duration::from_millis(1000));

        let started = Instant::now();
        let devices = source.fetch_devices(tenant).await;

        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert_eq!(devices, tenant.devices);
    }
}
