//! Tenant identity and the per-unit-of-work active-tenant marker.
//!
//! Two pieces live here:
//!
//! - [`TenantId`] — the opaque, exact-match key into the routing map, with
//!   one reserved value ([`DEFAULT_TARGET`]) naming the default connection
//!   target.
//! - [`TenantContext`] — the task-scoped marker recording which tenant the
//!   current unit of work runs as. Storage is keyed by tokio task scope, so
//!   concurrent units of work multiplexed over shared worker threads cannot
//!   observe each other's binding.

mod context;
mod id;

pub use context::TenantContext;
pub use id::{DEFAULT_TARGET, TenantId};
