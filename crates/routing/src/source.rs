//! Collaborator traits for connection and transaction handling.
//!
//! The routing core never creates, pools, health-checks, or disposes of
//! physical connections itself. It talks to the outside world through two
//! narrow seams:
//!
//! - [`ConnectionSource`] — "give me a live session for this target". A
//!   connection target (a pool, typically) is anything implementing this.
//! - [`Session`] — the transactional boundary on a live session: `begin`,
//!   `commit`, `rollback`. Releasing the underlying handle is RAII; dropping
//!   a session returns it to wherever it came from.
//!
//! [`TenantRouter`](crate::TenantRouter) itself implements
//! `ConnectionSource` by resolving the active tenant's target and
//! delegating, which is what lets application code acquire sessions without
//! ever naming a tenant.

use async_trait::async_trait;

use crate::error::BoxError;

/// A live database session with a transactional boundary.
///
/// Implementations map these to whatever the backend calls a transaction.
/// `commit` and `rollback` after the transaction has already ended should be
/// no-ops rather than errors, so the executor's cleanup path is always safe
/// to run.
#[async_trait]
pub trait Session: Send {
    /// Opens a transaction on this session.
    async fn begin(&mut self) -> Result<(), BoxError>;

    /// Commits the open transaction.
    async fn commit(&mut self) -> Result<(), BoxError>;

    /// Rolls back the open transaction.
    async fn rollback(&mut self) -> Result<(), BoxError>;
}

/// Produces live sessions for one connection target.
///
/// Implemented by connection targets themselves (e.g. a wrapper over a pool)
/// and by [`TenantRouter`](crate::TenantRouter), which resolves the active
/// tenant's target first. Acquisition is the only place in the routing core
/// allowed to block or wait; registry lookups never do.
#[async_trait]
pub trait ConnectionSource: Send + Sync {
    /// The session type this source produces.
    type Session: Session;

    /// Acquires a session bound to this source.
    async fn acquire(&self) -> Result<Self::Session, BoxError>;
}
