//! Fabric discovery for a tenant.

use opentelemetry::trace::{Span, Status, Tracer};
use opentelemetry::KeyValue;
use opentelemetry_sdk::trace::SdkTracer;
use std::sync::Arc;

use crate::discovery::types::{DeviceTelemetryResponse, DiscoveryError};
use crate::tenancy::context::{RequestContext, TENANT_ATTRIBUTE};
use crate::tenancy::source::DeviceSource;
use crate::tenancy::store::TenantStore;

/// Name of the span covering one discovery.
pub const DISCOVER_SPAN: &str = "fabric.discover";

/// Event recorded once device data has arrived.
pub const DEVICES_FETCHED_EVENT: &str = "Devices fetched from mock database";

/// Span attribute holding the number of devices returned.
pub const DEVICE_COUNT_ATTRIBUTE: &str = "app.device.count";

/// Looks up tenants and fetches their devices under a `fabric.discover` span.
#[derive(Clone)]
pub struct FabricDiscovery {
    tracer: SdkTracer,
    store: Arc<TenantStore>,
    source: Arc<dyn DeviceSource>,
}

impl FabricDiscovery {
    pub fn new(tracer: SdkTracer, store: Arc<TenantStore>, source: Arc<dyn DeviceSource>) -> Self {
        Self {
            tracer,
            store,
            source,
        }
    }

    /// Discover the devices of the tenant in `ctx`.
    ///
    /// The span is ended on both paths. If this future is dropped while the
    /// fetch is pending, the SDK ends the span when it is dropped.
    pub async fn discover(
        &self,
        ctx: &RequestContext,
    ) -> Result<DeviceTelemetryResponse, DiscoveryError> {
        let tenant = ctx.tenant();
        let mut span = self
            .tracer
            .start_with_context(DISCOVER_SPAN, ctx.trace_context());
        span.set_attribute(KeyValue::new(TENANT_ATTRIBUTE, tenant.as_str().to_string()));

        tracing::info!(tenant.id = %tenant, "Discovering fabric for tenant");

        let Some(record) = self.store.lookup(tenant) else {
            let err = DiscoveryError::TenantNotFound(tenant.as_str().to_string());
            tracing::warn!(tenant.id = %tenant, "Tenant not found");
            span.set_status(Status::error(err.to_string()));
            span.end();
            return Err(err);
        };

        let devices = self.source.fetch_devices(&record).await;
        span.add_event(DEVICES_FETCHED_EVENT, Vec::new());
        span.set_attribute(KeyValue::new(DEVICE_COUNT_ATTRIBUTE, devices.len() as i64));

        let response = DeviceTelemetryResponse::new(tenant.as_str(), &devices);
        span.end();
        Ok(response)
    }
}
