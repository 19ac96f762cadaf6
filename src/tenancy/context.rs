//! Request-scoped tenant context.
//!
//! # Responsibilities
//! - Resolve the tenant of an inbound request from a header
//! - Carry the resolved tenant and the active request span to handlers
//!
//! # Design Decisions
//! - Resolution never fails: a missing or empty header yields `TenantKey::Unknown`
//! - `Unknown` is its own variant, so it can never collide with a configured
//!   tenant that happens to be named like the sentinel
//! - Context is passed explicitly through request extensions, never looked up
//!   from ambient state

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, HeaderMap, HeaderName};
use opentelemetry::Context;
use std::convert::Infallible;
use std::fmt;

use crate::observability::span::RequestSpan;

/// Default header carrying the tenant identifier.
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Label used for requests that did not name a tenant.
pub const UNKNOWN_TENANT: &str = "unknown-tenant";

/// Span attribute holding the resolved tenant.
pub const TENANT_ATTRIBUTE: &str = "app.tenant.id";

/// The tenant a request was resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TenantKey {
    /// Tenant named by the request header.
    Provided(String),
    /// No tenant header was sent.
    Unknown,
}

impl TenantKey {
    pub fn as_str(&self) -> &str {
        match self {
            TenantKey::Provided(id) => id,
            TenantKey::Unknown => UNKNOWN_TENANT,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TenantKey::Unknown)
    }
}

impl fmt::Display for TenantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves tenants from a configurable request header.
#[derive(Debug, Clone)]
pub struct TenantResolver {
    header: HeaderName,
}

impl TenantResolver {
    pub fn new(header: HeaderName) -> Self {
        Self { header }
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    /// Resolve the tenant named by `headers`.
    pub fn resolve(&self, headers: &HeaderMap) -> TenantKey {
        match headers.get(&self.header) {
            Some(value) if !value.is_empty() => {
                TenantKey::Provided(String::from_utf8_lossy(value.as_bytes()).into_owned())
            }
            _ => TenantKey::Unknown,
        }
    }
}

impl Default for TenantResolver {
    fn default() -> Self {
        Self::new(HeaderName::from_static(TENANT_HEADER))
    }
}

/// Per-request context handed to handlers.
#[derive(Debug, Clone)]
pub struct RequestContext {
    tenant: TenantKey,
    trace: Context,
}

impl RequestContext {
    pub fn new(tenant: TenantKey, trace: Context) -> Self {
        Self { tenant, trace }
    }

    pub fn tenant(&self) -> &TenantKey {
        &self.tenant
    }

    /// Trace context of the request span. Empty when the request is not
    /// traced, in which case child spans start a new trace.
    pub fn trace_context(&self) -> &Context {
        &self.trace
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<RequestContext>() {
            return Ok(ctx.clone());
        }

        // Middleware not installed on this route; resolve with defaults.
        let trace = parts
            .extensions
            .get::<RequestSpan>()
            .map(|span| span.context().clone())
            .unwrap_or_default();
        let tenant = TenantResolver::default().resolve(&parts.headers);
        Ok(RequestContext::new(tenant, trace))
    }
}
