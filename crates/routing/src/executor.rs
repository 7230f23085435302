//! The execution template: run a unit of work as a specific tenant.
//!
//! [`TenantExecutor::execute`] is the only sanctioned way to bind a tenant
//! to a unit of work. It couples the active-tenant marker's lifetime to a
//! single bounded scope:
//!
//! 1. enter a [`TenantContext`] scope for the tenant;
//! 2. acquire a session through the router (resolution sees the marker);
//! 3. run the work inside `begin`/`commit`, rolling back on failure;
//! 4. release the session and clear the marker — on success, error, panic
//!    unwind, and cancellation alike.
//!
//! Step 4 needs no code of its own: the marker cell dies with the scoped
//! future and the session is released by drop, so no exit path can leak a
//! stale tenant binding for a later, unrelated unit of work to observe.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::{BoxError, ResourceUnavailable, RouterResult, UnitOfWorkFailure};
use crate::router::TenantRouter;
use crate::source::{ConnectionSource, Session};
use crate::tenant::{TenantContext, TenantId};

/// The boxed future a unit of work returns while borrowing its session.
pub type WorkFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R, BoxError>> + Send + 'a>>;

/// Runs units of work bound to a tenant, against sessions resolved through
/// a [`TenantRouter`].
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use switchyard_routing::{TenantExecutor, TenantRouter};
/// # use switchyard_routing::{BoxError, ConnectionSource, Session};
/// # struct Pool;
/// # struct Conn;
/// # #[async_trait::async_trait]
/// # impl Session for Conn {
/// #     async fn begin(&mut self) -> Result<(), BoxError> { Ok(()) }
/// #     async fn commit(&mut self) -> Result<(), BoxError> { Ok(()) }
/// #     async fn rollback(&mut self) -> Result<(), BoxError> { Ok(()) }
/// # }
/// # #[async_trait::async_trait]
/// # impl ConnectionSource for Pool {
/// #     type Session = Conn;
/// #     async fn acquire(&self) -> Result<Conn, BoxError> { Ok(Conn) }
/// # }
///
/// # #[tokio::main] async fn main() -> Result<(), switchyard_routing::RouterError> {
/// let router = Arc::new(TenantRouter::new(Pool /* default pool */));
/// router.add("acme", Pool /* acme's pool */)?;
///
/// let executor = TenantExecutor::new(router);
/// let rows = executor
///     .execute("acme", |session| {
///         Box::pin(async move {
///             // run queries against `session`; commit happens on success
///             Ok(42)
///         })
///     })
///     .await?;
/// assert_eq!(rows, 42);
/// # Ok(()) }
/// ```
pub struct TenantExecutor<T: ConnectionSource> {
    router: Arc<TenantRouter<T>>,
}

impl<T: ConnectionSource> Clone for TenantExecutor<T> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
        }
    }
}

impl<T: ConnectionSource> TenantExecutor<T> {
    /// Creates an executor over the given router.
    pub fn new(router: Arc<TenantRouter<T>>) -> Self {
        Self { router }
    }

    /// Returns the router this executor resolves through.
    pub fn router(&self) -> &Arc<TenantRouter<T>> {
        &self.router
    }

    /// Runs `work` as `tenant_id`, inside a transaction on a session
    /// resolved for that tenant.
    ///
    /// Returns whatever `work` produces on success. A session-acquisition
    /// failure surfaces as [`RouterError::ResourceUnavailable`]; a failure
    /// of `work` or of the transactional boundary surfaces as
    /// [`RouterError::UnitOfWorkFailure`] carrying the original error
    /// unmodified, after rollback. No error is retried or swallowed.
    ///
    /// The tenant binding is visible to resolution only for the duration of
    /// this call and is cleared on every exit path.
    ///
    /// [`RouterError::ResourceUnavailable`]: crate::RouterError::ResourceUnavailable
    /// [`RouterError::UnitOfWorkFailure`]: crate::RouterError::UnitOfWorkFailure
    pub async fn execute<R, F>(&self, tenant_id: impl Into<TenantId>, work: F) -> RouterResult<R>
    where
        R: Send,
        F: for<'s> FnOnce(&'s mut T::Session) -> WorkFuture<'s, R> + Send,
    {
        let tenant = tenant_id.into();
        TenantContext::scope(tenant.clone(), self.run(tenant, work)).await
    }

    /// The body of [`execute`](Self::execute), already inside the tenant
    /// scope.
    async fn run<R, F>(&self, tenant: TenantId, work: F) -> RouterResult<R>
    where
        R: Send,
        F: for<'s> FnOnce(&'s mut T::Session) -> WorkFuture<'s, R> + Send,
    {
        let mut session = self.router.acquire().await.map_err(|source| {
            ResourceUnavailable {
                tenant: tenant.clone(),
                source,
            }
        })?;

        session
            .begin()
            .await
            .map_err(UnitOfWorkFailure::new)?;

        match work(&mut session).await {
            Ok(value) => {
                session.commit().await.map_err(UnitOfWorkFailure::new)?;
                tracing::trace!(tenant_id = %tenant, "unit of work committed");
                Ok(value)
            }
            Err(err) => {
                // The work's error wins; a rollback failure is logged, not
                // propagated, so the original error reaches the caller.
                if let Err(rollback_err) = session.rollback().await {
                    tracing::warn!(
                        tenant_id = %tenant,
                        error = %rollback_err,
                        "rollback failed after unit-of-work error"
                    );
                }
                Err(UnitOfWorkFailure::new(err).into())
            }
        }
    }
}
