//! Request middleware.
//!
//! Order, outermost first: request span → HTTP trace span → tenant context → handler.

pub mod request_span;
pub mod tenant;

pub use request_span::{http_trace_span, request_span_middleware};
pub use tenant::tenant_context_middleware;
