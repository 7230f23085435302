//! Switchyard multi-tenant data-source routing.
//!
//! This crate lets a single running process serve many tenants, each backed
//! by its own physical connection target (typically a pool), while
//! application code performs data access without ever naming the tenant
//! explicitly. Three pieces cooperate:
//!
//! - [`TenantRouter`] — a dynamic registry mapping [`TenantId`] to
//!   connection targets, safe under concurrent registration, removal, and
//!   lookup, with one always-present default target.
//! - [`TenantContext`] — the per-unit-of-work record of which tenant the
//!   current operation runs as, keyed by tokio task scope so concurrent
//!   tasks sharing worker threads never leak each other's binding.
//! - [`TenantExecutor`] — binds a tenant to a unit of work, runs it inside a
//!   transaction on a session resolved through the router, and guarantees
//!   the binding is cleared on every exit path.
//!
//! # Fallback policy
//!
//! Resolution follows a single explicit policy: a unit of work with no
//! active tenant, or with a tenant that has no registered target, resolves
//! to the default target. [`TenantRouter::resolve`] never fails.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use switchyard_routing::{
//!     BoxError, ConnectionSource, Session, TenantExecutor, TenantRouter,
//! };
//!
//! // A connection target is anything implementing `ConnectionSource`.
//! // Real applications wrap a pool; a counter stands in here.
//! struct InMemoryTarget(&'static str);
//! struct InMemorySession(&'static str);
//!
//! #[async_trait::async_trait]
//! impl Session for InMemorySession {
//!     async fn begin(&mut self) -> Result<(), BoxError> { Ok(()) }
//!     async fn commit(&mut self) -> Result<(), BoxError> { Ok(()) }
//!     async fn rollback(&mut self) -> Result<(), BoxError> { Ok(()) }
//! }
//!
//! #[async_trait::async_trait]
//! impl ConnectionSource for InMemoryTarget {
//!     type Session = InMemorySession;
//!     async fn acquire(&self) -> Result<InMemorySession, BoxError> {
//!         Ok(InMemorySession(self.0))
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), switchyard_routing::RouterError> {
//! let router = Arc::new(TenantRouter::new(InMemoryTarget("default")));
//! router.add("acme", InMemoryTarget("acme"))?;
//!
//! let executor = TenantExecutor::new(Arc::clone(&router));
//! let backend = executor
//!     .execute("acme", |session| {
//!         Box::pin(async move { Ok(session.0) })
//!     })
//!     .await?;
//! assert_eq!(backend, "acme");
//! # Ok(())
//! # }
//! ```
//!
//! # Ownership
//!
//! The router references connection targets, it does not own them: targets
//! are created by the embedding application and shared behind [`Arc`];
//! removal only drops the router's reference. Pool creation, validation,
//! and disposal stay with the caller.
//!
//! # Backend integrations
//!
//! Feature flags add adapters for common pool crates:
//!
//! - `postgres` — deadpool-postgres targets ([`backends::postgres`])
//!
//! [`Arc`]: std::sync::Arc

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod config;
pub mod error;
pub mod executor;
pub mod router;
pub mod source;
pub mod tenant;

// Re-export commonly used types at crate root
pub use config::RouterConfig;
pub use error::{BoxError, InvalidArgument, ResourceUnavailable, RouterError, RouterResult, UnitOfWorkFailure};
pub use executor::{TenantExecutor, WorkFuture};
pub use router::{TenantRegistry, TenantRouter};
pub use source::{ConnectionSource, Session};
pub use tenant::{DEFAULT_TARGET, TenantContext, TenantId};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
