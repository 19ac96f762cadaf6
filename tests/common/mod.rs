//! Shared utilities for integration tests.

use opentelemetry::trace::Status;
use opentelemetry::Value;
use opentelemetry_sdk::trace::{InMemorySpanExporter, SpanData};
use std::net::SocketAddr;
use tokio::task::JoinHandle;

use tenant_telemetry::config::ServiceConfig;
use tenant_telemetry::lifecycle::{bind, Service, Shutdown, StartupError};
use tenant_telemetry::observability::Telemetry;

/// A running service on an ephemeral port, recording spans in memory.
pub struct TestService {
    pub addr: SocketAddr,
    pub exporter: InMemorySpanExporter,
    shutdown: Shutdown,
    handle: JoinHandle<Result<Telemetry, StartupError>>,
}

impl TestService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Finished spans called `name`, in the order they ended.
    pub fn spans_named(&self, name: &str) -> Vec<SpanData> {
        self.exporter
            .get_finished_spans()
            .unwrap()
            .into_iter()
            .filter(|s| s.name == name)
            .collect()
    }

    #[allow(dead_code)]
    pub fn finished_spans(&self) -> Vec<SpanData> {
        self.exporter.get_finished_spans().unwrap()
    }

    /// Signal shutdown and wait for the server and telemetry to stop.
    pub async fn stop(self) -> Telemetry {
        self.shutdown.trigger();
        self.handle
            .await
            .expect("service task panicked")
            .expect("service failed")
    }
}

/// Start the service with the given simulated fetch delay.
pub async fn start_service(fetch_delay_ms: u64) -> TestService {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.discovery.fetch_delay_ms = fetch_delay_ms;
    config.observability.shutdown_timeout_ms = 2000;

    let exporter = InMemorySpanExporter::default();
    let service = Service::with_exporter(config, exporter.clone()).expect("telemetry start");
    let listener = bind(&service.config().listener).await.expect("bind");
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(service.serve(listener, shutdown.subscribe()));

    TestService {
        addr,
        exporter,
        shutdown,
        handle,
    }
}

/// HTTP client that never pools or proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

pub fn attribute(span: &SpanData, key: &str) -> Option<Value> {
    span.attributes
        .iter()
        .find(|kv| kv.key.as_str() == key)
        .map(|kv| kv.value.clone())
}

#[allow(dead_code)]
pub fn has_event(span: &SpanData, name: &str) -> bool {
    span.events.events.iter().any(|e| e.name == name)
}

#[allow(dead_code)]
pub fn error_description(span: &SpanData) -> Option<String> {
    match &span.status {
        Status::Error { description } => Some(description.to_string()),
        _ => None,
    }
}
