//! End-to-end tests of the discovery API over real TCP.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde_json::{json, Value};
use tenant_telemetry::discovery::{DEVICES_FETCHED_EVENT, DISCOVER_SPAN};
use tenant_telemetry::observability::TelemetryState;

mod common;

const DISCOVER: &str = "/api/v1/fabric/discover";
const DISCOVER_REQUEST_SPAN: &str = "GET /api/v1/fabric/discover";

#[tokio::test]
async fn test_known_tenants_return_projected_devices() {
    let service = common::start_service(200).await;
    let client = common::client();

    let started = Instant::now();
    let res = client
        .get(service.url(DISCOVER))
        .header("X-Tenant-ID", "tenant-a")
        .send()
        .await
        .expect("service unreachable");
    assert!(started.elapsed() >= Duration::from_millis(200));
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"tenantId":"tenant-a","devices":[{"id":"dev1-A","status":"online"},{"id":"dev2-A","status":"offline"}]}"#
    );

    let res = client
        .get(service.url(DISCOVER))
        .header("x-tenant-id", "tenant-b")
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "tenantId": "tenant-b",
            "devices": [
                { "id": "dev1-B", "status": "online" },
                { "id": "dev2-B", "status": "online" },
            ]
        })
    );

    service.stop().await;
}

#[tokio::test]
async fn test_unknown_and_missing_tenants_are_404() {
    let service = common::start_service(1000).await;
    let client = common::client();

    let started = Instant::now();
    let res = client
        .get(service.url(DISCOVER))
        .header("X-Tenant-ID", "tenant-c")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), r#"{"error":"Tenant not found"}"#);

    let res = client.get(service.url(DISCOVER)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), r#"{"error":"Tenant not found"}"#);

    // Misses never wait for the simulated fetch.
    assert!(started.elapsed() < Duration::from_millis(1000));

    let spans = service.spans_named(DISCOVER_SPAN);
    assert_eq!(spans.len(), 2);
    let messages: Vec<String> = spans
        .iter()
        .map(|s| common::error_description(s).expect("discover span should be failed"))
        .collect();
    assert!(messages[0].contains("tenant-c"));
    assert!(messages[1].contains("unknown-tenant"));

    service.stop().await;
}

#[tokio::test]
async fn test_root_route_always_ok() {
    let service = common::start_service(0).await;
    let client = common::client();

    for tenant in [None, Some("tenant-a"), Some("nobody")] {
        let mut req = client.get(service.url("/"));
        if let Some(tenant) = tenant {
            req = req.header("X-Tenant-ID", tenant);
        }
        let res = req.send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(!res.text().await.unwrap().is_empty());
    }

    service.stop().await;
}

#[tokio::test]
async fn test_every_discover_span_ends_once_under_its_request_span() {
    let service = common::start_service(50).await;
    let client = common::client();

    for tenant in ["tenant-a", "tenant-b", "tenant-c"] {
        client
            .get(service.url(DISCOVER))
            .header("X-Tenant-ID", tenant)
            .send()
            .await
            .unwrap();
    }

    let request_spans = service.spans_named(DISCOVER_REQUEST_SPAN);
    let discover_spans = service.spans_named(DISCOVER_SPAN);
    assert_eq!(request_spans.len(), 3);
    assert_eq!(discover_spans.len(), 3);

    for child in &discover_spans {
        let parent = request_spans
            .iter()
            .find(|r| r.span_context.span_id() == child.parent_span_id)
            .expect("discover span has no request span parent");
        assert_eq!(parent.span_context.trace_id(), child.span_context.trace_id());
        assert_eq!(
            common::attribute(parent, "app.tenant.id"),
            common::attribute(child, "app.tenant.id")
        );
    }

    let fetched = discover_spans
        .iter()
        .filter(|s| common::has_event(s, DEVICES_FETCHED_EVENT))
        .count();
    assert_eq!(fetched, 2);

    // Each span id appears once: no span was exported twice.
    let finished = service.finished_spans();
    let ids: HashSet<_> = finished.iter().map(|s| s.span_context.span_id()).collect();
    assert_eq!(ids.len(), finished.len());

    let telemetry = service.stop().await;
    assert_eq!(telemetry.state(), TelemetryState::Terminated);
}

#[tokio::test]
async fn test_shutdown_drains_in_flight_request() {
    let service = common::start_service(300).await;
    let client = common::client();

    let url = service.url(DISCOVER);
    let in_flight = tokio::spawn(async move {
        client
            .get(url)
            .header("X-Tenant-ID", "tenant-a")
            .send()
            .await
            .map(|res| res.status())
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    let telemetry = service.stop().await;

    assert_eq!(in_flight.await.unwrap().unwrap(), StatusCode::OK);
    assert_eq!(telemetry.state(), TelemetryState::Terminated);
    assert!(telemetry.start().is_err());
}
