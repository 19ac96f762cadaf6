//! Route handlers.

use axum::{extract::State, Json};
use opentelemetry::trace::TraceContextExt;
use std::time::Instant;

use crate::discovery::{DeviceTelemetryResponse, DiscoveryError};
use crate::http::server::AppState;
use crate::observability::metrics::{self, DiscoveryOutcome};
use crate::tenancy::context::RequestContext;

/// Body of the root route.
pub const STATUS_MESSAGE: &str = "Multi-tenancy telemetry service is running!";

/// Event recorded on the request span by the root route.
pub const ROOT_EVENT: &str = "Root endpoint accessed";

/// `GET /`
pub async fn root(ctx: RequestContext) -> &'static str {
    ctx.trace_context().span().add_event(ROOT_EVENT, Vec::new());
    STATUS_MESSAGE
}

/// `GET /api/v1/fabric/discover`
pub async fn discover(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<DeviceTelemetryResponse>, DiscoveryError> {
    let start = Instant::now();
    let result = state.discovery.discover(&ctx).await;

    let outcome = match &result {
        Ok(_) => DiscoveryOutcome::Found,
        Err(DiscoveryError::TenantNotFound(_)) => DiscoveryOutcome::TenantNotFound,
    };
    metrics::record_discovery(outcome, start);

    result.map(Json)
}
