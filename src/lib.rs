//! Multi-tenant device telemetry service.
//!
//! Resolves the tenant of each request from a header, traces discovery of
//! the tenant's devices under explicit parent/child spans, and returns a
//! minimal JSON device summary.

pub mod config;
pub mod discovery;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod tenancy;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::{Service, Shutdown};
