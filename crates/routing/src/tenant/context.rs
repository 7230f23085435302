//! The active-tenant marker for the current unit of work.
//!
//! This module holds the per-unit-of-work record of which tenant the current
//! operation runs as. The unit-of-work identity is the **tokio task scope**,
//! not the OS thread: tasks multiplexed onto shared worker threads each carry
//! their own marker, so concurrent units of work can never observe each
//! other's tenant binding.
//!
//! The marker lives in a [`tokio::task_local!`] cell. A scope established via
//! [`TenantContext::scope`] owns the cell for exactly the lifetime of the
//! scoped future; when the future completes — or is dropped on a cancellation
//! path — the cell is destroyed with it. Clearing is therefore unconditional
//! on every exit path and requires no cleanup code at the call sites.

use std::cell::RefCell;
use std::future::Future;

use super::id::TenantId;

tokio::task_local! {
    static ACTIVE_TENANT: RefCell<Option<TenantId>>;
}

/// Accessor for the active-tenant marker of the calling unit of work.
///
/// `TenantContext` exposes the identity of "the tenant for the currently
/// executing unit of work" to any code on that execution path, without the
/// identity being threaded explicitly through every call. The routing layer
/// reads it once per connection resolution.
///
/// # Examples
///
/// ```
/// use switchyard_routing::{TenantContext, TenantId};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let seen = TenantContext::scope(TenantId::new("acme"), async {
///     TenantContext::current()
/// })
/// .await;
/// assert_eq!(seen, Some(TenantId::new("acme")));
///
/// // Outside any scope there is no unit of work and no marker.
/// assert_eq!(TenantContext::current(), None);
/// # }
/// ```
#[derive(Debug)]
pub struct TenantContext;

impl TenantContext {
    /// Runs `future` as a unit of work bound to `tenant`.
    ///
    /// The future gets its own freshly-initialized marker cell; scopes nest,
    /// with an inner scope shadowing the outer one and the outer binding
    /// restored when the inner future finishes. The marker is destroyed when
    /// the scoped future completes or is dropped, so cancellation clears it
    /// too.
    pub async fn scope<F>(tenant: TenantId, future: F) -> F::Output
    where
        F: Future,
    {
        ACTIVE_TENANT.scope(RefCell::new(Some(tenant)), future).await
    }

    /// Runs `future` as a unit of work with no tenant bound.
    ///
    /// Connection resolution inside the scope falls back to the default
    /// target unless [`set_current`](Self::set_current) is called first.
    pub async fn unbound_scope<F>(future: F) -> F::Output
    where
        F: Future,
    {
        ACTIVE_TENANT.scope(RefCell::new(None), future).await
    }

    /// Returns the tenant recorded for the calling unit of work.
    ///
    /// Returns `None` if no tenant was set, if the marker was cleared, or if
    /// the caller is not running inside any scope. Never returns a value set
    /// by a different concurrent unit of work.
    pub fn current() -> Option<TenantId> {
        ACTIVE_TENANT
            .try_with(|cell| cell.borrow().clone())
            .ok()
            .flatten()
    }

    /// Records `tenant` as active for the calling unit of work, overwriting
    /// any prior value.
    ///
    /// Outside any scope there is no unit of work to bind, and the call is a
    /// no-op. Never fails.
    pub fn set_current(tenant: TenantId) {
        let _ = ACTIVE_TENANT.try_with(|cell| {
            *cell.borrow_mut() = Some(tenant);
        });
    }

    /// Clears the marker for the calling unit of work.
    ///
    /// Idempotent; clearing an unset marker (or calling outside any scope)
    /// is a no-op.
    pub fn clear() {
        let _ = ACTIVE_TENANT.try_with(|cell| {
            cell.borrow_mut().take();
        });
    }

    /// Returns `true` if a tenant is bound to the calling unit of work.
    pub fn is_bound() -> bool {
        Self::current().is_some()
    }
}
