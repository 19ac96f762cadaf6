//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, request span, HTTP trace, tenant context)
//! - Bind server to listener
//! - Stop accepting and drain in-flight requests on shutdown

use axum::{http::HeaderName, middleware, routing::get, Router};
use opentelemetry_sdk::trace::SdkTracer;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::discovery::FabricDiscovery;
use crate::http::handlers::{discover, root};
use crate::http::middleware::{
    http_trace_span, request_span_middleware, tenant_context_middleware,
};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::tenancy::context::TenantResolver;
use crate::tenancy::source::{DelayedDeviceSource, DeviceSource};
use crate::tenancy::store::TenantStore;

/// Path of the discovery route.
pub const DISCOVER_PATH: &str = "/api/v1/fabric/discover";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub discovery: FabricDiscovery,
    pub tracer: SdkTracer,
    pub resolver: TenantResolver,
}

/// HTTP server for the telemetry service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a server whose device fetch is the configured fixed delay.
    pub fn new(config: ServiceConfig, tracer: SdkTracer) -> Self {
        let source = Arc::new(DelayedDeviceSource::new(config.discovery.fetch_delay()));
        Self::with_source(config, tracer, source)
    }

    /// Create a server fetching devices from `source`.
    pub fn with_source(
        config: ServiceConfig,
        tracer: SdkTracer,
        source: Arc<dyn DeviceSource>,
    ) -> Self {
        let store = Arc::new(TenantStore::new(config.tenants.clone()));
        let resolver = match HeaderName::from_bytes(config.discovery.tenant_header.as_bytes()) {
            Ok(header) => TenantResolver::new(header),
            Err(_) => {
                tracing::warn!(
                    header = %config.discovery.tenant_header,
                    "Invalid tenant header name, using default"
                );
                TenantResolver::default()
            }
        };

        tracing::info!(
            tenants = store.len(),
            tenant_header = %resolver.header(),
            "Tenant store loaded"
        );

        let state = AppState {
            discovery: FabricDiscovery::new(tracer.clone(), store, source),
            tracer,
            resolver,
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(root))
            .route(DISCOVER_PATH, get(discover))
            .layer(middleware::from_fn_with_state(
                state.resolver.clone(),
                tenant_context_middleware,
            ))
            .layer(TraceLayer::new_for_http().make_span_with(http_trace_span))
            .layer(middleware::from_fn_with_state(
                state.tracer.clone(),
                request_span_middleware,
            ))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
            .with_state(state)
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
