//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (request ID assigned and echoed)
//!     → middleware/request_span.rs (root span for the request)
//!     → middleware/tenant.rs (tenant resolved into RequestContext)
//!     → handlers.rs (root status, fabric discovery)
//!     → response.rs (domain errors mapped to status + JSON)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
pub use response::ErrorBody;
pub use server::{AppState, HttpServer, DISCOVER_PATH};
