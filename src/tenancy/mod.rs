//! Tenancy subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request headers
//!     → context.rs (resolve TenantKey, build RequestContext)
//!     → store.rs (exact-match TenantRecord lookup)
//!     → source.rs (async device fetch for the tenant)
//! ```
//!
//! # Design Decisions
//! - Tenant data is immutable after startup and shared via Arc
//! - Only the store lookup can reject a tenant; resolution is total

pub mod context;
pub mod source;
pub mod store;
pub mod types;

pub use context::{RequestContext, TenantKey, TenantResolver, TENANT_HEADER, UNKNOWN_TENANT};
pub use source::{DelayedDeviceSource, DeviceSource};
pub use store::TenantStore;
pub use types::{DeviceClass, DeviceRecord, DeviceStatus, TenantRecord};
