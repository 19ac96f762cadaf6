//! Root span per HTTP request.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use opentelemetry::trace::{SpanKind, Status, TraceContextExt, Tracer};
use opentelemetry::{Context, KeyValue};
use opentelemetry_sdk::trace::SdkTracer;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::http::request::RequestIdExt;
use crate::observability::span::RequestSpan;

/// Open a server span around the whole request and expose it as
/// [`RequestSpan`].
pub async fn request_span_middleware(
    State(tracer): State<SdkTracer>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut attributes = vec![
        KeyValue::new("http.method", method.to_string()),
        KeyValue::new("http.target", path.clone()),
    ];
    if let Some(id) = request.request_id() {
        attributes.push(KeyValue::new("http.request_id", id.to_string()));
    }

    let span = tracer
        .span_builder(format!("{} {}", method, path))
        .with_kind(SpanKind::Server)
        .with_attributes(attributes)
        .start_with_context(&tracer, &Context::new());
    let cx = Context::new().with_span(span);
    request.extensions_mut().insert(RequestSpan(cx.clone()));

    let response = next.run(request).await;

    let span = cx.span();
    let status = response.status();
    span.set_attribute(KeyValue::new("http.status_code", i64::from(status.as_u16())));
    if status.is_server_error() {
        span.set_status(Status::error(format!("HTTP {}", status.as_u16())));
    }
    span.end();
    response
}

/// `tower-http` trace span for a request, parented on its [`RequestSpan`].
///
/// With the OpenTelemetry layer installed this span and every log line
/// inside it carry the request's trace id.
pub fn http_trace_span(request: &Request<Body>) -> tracing::Span {
    let span = tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        trace_id = tracing::field::Empty,
    );
    if let Some(root) = request.extensions().get::<RequestSpan>() {
        span.record("trace_id", tracing::field::display(root.trace_id()));
        span.set_parent(root.context().clone());
    }
    span
}
