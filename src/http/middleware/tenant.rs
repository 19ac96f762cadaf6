//! Tenant context middleware.
//! Resolves the tenant of every request before any handler runs.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use opentelemetry::trace::TraceContextExt;
use opentelemetry::KeyValue;

use crate::observability::span::RequestSpan;
use crate::tenancy::context::{RequestContext, TenantResolver, TENANT_ATTRIBUTE};

/// Attach a [`RequestContext`] to the request. Never rejects.
pub async fn tenant_context_middleware(
    State(resolver): State<TenantResolver>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let tenant = resolver.resolve(request.headers());

    // Without a request span this is an empty context and the attribute is dropped.
    let trace = request
        .extensions()
        .get::<RequestSpan>()
        .map(|span| span.context().clone())
        .unwrap_or_default();
    trace
        .span()
        .set_attribute(KeyValue::new(TENANT_ATTRIBUTE, tenant.as_str().to_string()));

    tracing::debug!(tenant.id = %tenant, "Resolved request tenant");

    request
        .extensions_mut()
        .insert(RequestContext::new(tenant, trace));
    next.run(request).await
}
