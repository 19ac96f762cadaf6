//! Request span handle.
//!
//! The root span of every HTTP request lives in an `opentelemetry::Context`
//! stored in the request extensions. Inner layers and handlers read it from
//! there and pass it explicitly as the parent of their own spans.

use opentelemetry::trace::{TraceContextExt, TraceId};
use opentelemetry::Context;

/// Request extension holding the context of the request's root span.
#[derive(Debug, Clone)]
pub struct RequestSpan(pub Context);

impl RequestSpan {
    pub fn context(&self) -> &Context {
        &self.0
    }

    /// Trace id shared by every span of this request.
    pub fn trace_id(&self) -> TraceId {
        self.0.span().span_context().trace_id()
    }
}
