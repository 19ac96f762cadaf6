//! Fabric discovery.
//!
//! # Data Flow
//! ```text
//! RequestContext (tenant + request span)
//!     → engine.rs (child span, store lookup, device fetch, event)
//!     → types.rs (DeviceTelemetryResponse or DiscoveryError)
//! ```

pub mod engine;
pub mod types;

pub use engine::{FabricDiscovery, DEVICES_FETCHED_EVENT, DISCOVER_SPAN};
pub use types::{DeviceSummary, DeviceTelemetryResponse, DiscoveryError};
