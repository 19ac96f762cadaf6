//! Span assertions shared by unit tests.

use opentelemetry::trace::{Status, TracerProvider};
use opentelemetry::Value;
use opentelemetry_sdk::trace::{InMemorySpanExporter, SdkTracer, SdkTracerProvider, SpanData};

/// A tracer whose finished spans land in memory.
pub(crate) struct TestTracing {
    _provider: SdkTracerProvider,
    pub tracer: SdkTracer,
    pub exporter: InMemorySpanExporter,
}

impl TestTracing {
    pub(crate) fn new() -> Self {
        let exporter = InMemorySpanExporter::default();
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(exporter.clone())
            .build();
        let tracer = provider.tracer("test");
        Self {
            _provider: provider,
            tracer,
            exporter,
        }
    }

    pub(crate) fn finished(&self) -> Vec<SpanData> {
        self.exporter.get_finished_spans().unwrap()
    }

    pub(crate) fn spans_named(&self, name: &str) -> Vec<SpanData> {
        self.finished()
            .into_iter()
            .filter(|s| s.name == name)
            .collect()
    }

    /// The single finished span called `name`.
    pub(crate) fn only_span(&self, name: &str) -> SpanData {
        let spans = self.spans_named(name);
        assert_eq!(spans.len(), 1, "expected exactly one '{}' span", name);
        spans.into_iter().next().unwrap()
    }
}

pub(crate) fn attribute(span: &SpanData, key: &str) -> Option<Value> {
    span.attributes
        .iter()
        .find(|kv| kv.key.as_str() == key)
        .map(|kv| kv.value.clone())
}

pub(crate) fn has_event(span: &SpanData, name: &str) -> bool {
    span.events.events.iter().any(|e| e.name == name)
}

pub(crate) fn error_description(span: &SpanData) -> Option<String> {
    match &span.status {
        Status::Error { description } => Some(description.to_string()),
        _ => None,
    }
}
