//! The tenant routing core: the tenant→target map and connection resolution.
//!
//! [`TenantRouter`] owns the only shared mutable state in the crate, the map
//! from [`TenantId`] to connection target. Mutation happens exclusively
//! through [`add`](TenantRouter::add) and [`remove`](TenantRouter::remove);
//! every other component reads it through [`resolve`](TenantRouter::resolve).
//!
//! # Fallback policy
//!
//! Resolution follows one explicit policy: **a unit of work with no active
//! tenant, or with a tenant that has no registered target, resolves to the
//! default target.** `resolve` never fails and never blocks on I/O; the
//! default target is fixed at construction and structurally cannot be
//! removed.
//!
//! # Concurrency
//!
//! The map sits behind a `parking_lot::RwLock` with short critical sections
//! over O(1) map operations; the lock is never held across I/O or `await`.
//! Mutations are linearizable with respect to lookups: a `resolve` started
//! after `add`/`remove` returns observes its effect, and a lookup concurrent
//! with a mutation sees the old or the new entry, never a torn map.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::config::{RouterConfig, TenantIdValidator};
use crate::error::{BoxError, InvalidArgument, RouterResult};
use crate::source::ConnectionSource;
use crate::tenant::{TenantContext, TenantId};

/// The public registry surface exposed to the embedding application.
///
/// A thin pass-through to [`TenantRouter::add`] and
/// [`TenantRouter::remove`]; applications that only register and unregister
/// tenants can hold the router as `Arc<dyn TenantRegistry<T>>` and stay
/// ignorant of the routing machinery.
pub trait TenantRegistry<T>: Send + Sync {
    /// Registers (or replaces) the connection target for a tenant.
    fn add_data_source(&self, tenant_id: &str, target: Arc<T>) -> RouterResult<()>;

    /// Unregisters the connection target for a tenant, if present.
    fn remove_data_source(&self, tenant_id: &str) -> RouterResult<()>;
}

/// Maps tenants to connection targets and resolves the target for the
/// active tenant.
///
/// Targets are held behind [`Arc`]: the router shares them, it does not own
/// them. Creating, health-checking, and disposing of targets stays with the
/// embedding application; dropping the router (or removing an entry) only
/// releases the router's reference.
///
/// # Examples
///
/// ```
/// use switchyard_routing::{TenantContext, TenantId, TenantRouter};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), switchyard_routing::RouterError> {
/// // Targets are opaque to the router; a string stands in for a pool here.
/// let router = TenantRouter::<String>::new("default-pool".to_string());
/// router.add("acme", "acme-pool".to_string())?;
///
/// let target = TenantContext::scope(TenantId::new("acme"), async {
///     router.resolve()
/// })
/// .await;
/// assert_eq!(*target, "acme-pool");
///
/// // No active tenant: the default target backs the work.
/// assert_eq!(*router.resolve(), "default-pool");
/// # Ok(())
/// # }
/// ```
pub struct TenantRouter<T> {
    targets: RwLock<HashMap<TenantId, Arc<T>>>,
    default_target: Arc<T>,
    validator: TenantIdValidator,
}

impl<T> TenantRouter<T> {
    /// Creates a router backed by the given default target, with the default
    /// configuration.
    pub fn new(default_target: impl Into<Arc<T>>) -> Self {
        Self {
            targets: RwLock::new(HashMap::new()),
            default_target: default_target.into(),
            validator: TenantIdValidator::default_bounds(),
        }
    }

    /// Creates a router with an explicit [`RouterConfig`].
    ///
    /// Fails with [`InvalidArgument::InvalidPattern`] if the configured
    /// tenant id pattern is not a valid regex.
    pub fn with_config(
        default_target: impl Into<Arc<T>>,
        config: RouterConfig,
    ) -> RouterResult<Self> {
        let validator = TenantIdValidator::compile(&config)?;
        Ok(Self {
            targets: RwLock::new(HashMap::new()),
            default_target: default_target.into(),
            validator,
        })
    }

    /// Inserts or overwrites the connection target for `tenant_id`.
    ///
    /// Safe to call concurrently with lookups and other mutations; a lookup
    /// in flight observes either the old or the new target for a replaced
    /// entry. Fails with [`InvalidArgument`] if the id is empty, reserved,
    /// or violates the configured bounds.
    pub fn add(
        &self,
        tenant_id: impl Into<TenantId>,
        target: impl Into<Arc<T>>,
    ) -> RouterResult<()> {
        let id = tenant_id.into();
        self.validator.validate(&id)?;

        let replaced = self.targets.write().insert(id.clone(), target.into());
        tracing::debug!(
            tenant_id = %id,
            replaced = replaced.is_some(),
            "registered tenant connection target"
        );
        Ok(())
    }

    /// Removes the connection target for `tenant_id`, if present.
    ///
    /// Removing an unknown id is a no-op. Removing the reserved default id
    /// fails with [`InvalidArgument::ReservedTenantId`]; the default target
    /// is fixed for the lifetime of the router.
    pub fn remove(&self, tenant_id: impl AsRef<str>) -> RouterResult<()> {
        let id = tenant_id.as_ref();
        if id.is_empty() {
            return Err(InvalidArgument::EmptyTenantId.into());
        }
        if id == crate::tenant::DEFAULT_TARGET {
            return Err(InvalidArgument::ReservedTenantId {
                tenant_id: TenantId::default_target(),
            }
            .into());
        }

        let removed = self.targets.write().remove(id);
        if removed.is_some() {
            tracing::debug!(tenant_id = %id, "unregistered tenant connection target");
        }
        Ok(())
    }

    /// Resolves the connection target for the active tenant.
    ///
    /// Reads the active-tenant marker once. With no tenant bound, or a
    /// tenant absent from the map, this returns the default target — the
    /// single fallback policy of the crate. Never fails.
    pub fn resolve(&self) -> Arc<T> {
        match TenantContext::current() {
            Some(id) => {
                let targets = self.targets.read();
                match targets.get(&id) {
                    Some(target) => Arc::clone(target),
                    None => {
                        drop(targets);
                        tracing::debug!(
                            tenant_id = %id,
                            "no target registered for active tenant; using default"
                        );
                        Arc::clone(&self.default_target)
                    }
                }
            }
            None => Arc::clone(&self.default_target),
        }
    }

    /// Returns the target registered for `tenant_id`, ignoring the active
    /// tenant and the fallback policy.
    pub fn target_for(&self, tenant_id: impl AsRef<str>) -> Option<Arc<T>> {
        self.targets.read().get(tenant_id.as_ref()).map(Arc::clone)
    }

    /// Returns the default target.
    pub fn default_target(&self) -> Arc<T> {
        Arc::clone(&self.default_target)
    }

    /// Returns `true` if a target is registered for `tenant_id`.
    pub fn contains(&self, tenant_id: impl AsRef<str>) -> bool {
        self.targets.read().contains_key(tenant_id.as_ref())
    }

    /// Number of registered tenants, excluding the default target.
    pub fn len(&self) -> usize {
        self.targets.read().len()
    }

    /// Returns `true` if no tenants are registered.
    pub fn is_empty(&self) -> bool {
        self.targets.read().is_empty()
    }

    /// The ids of all registered tenants, in no particular order.
    pub fn tenant_ids(&self) -> Vec<TenantId> {
        self.targets.read().keys().cloned().collect()
    }
}

impl<T> fmt::Debug for TenantRouter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantRouter")
            .field("tenants", &self.len())
            .finish_non_exhaustive()
    }
}

impl<T: Send + Sync> TenantRegistry<T> for TenantRouter<T> {
    fn add_data_source(&self, tenant_id: &str, target: Arc<T>) -> RouterResult<()> {
        self.add(tenant_id, target)
    }

    fn remove_data_source(&self, tenant_id: &str) -> RouterResult<()> {
        self.remove(tenant_id)
    }
}

/// The router is itself a connection source: acquiring a session resolves
/// the active tenant's target first, then delegates. This is the seam that
/// lets the connection-consuming collaborator stay tenant-unaware.
#[async_trait]
impl<T> ConnectionSource for TenantRouter<T>
where
    T: ConnectionSource,
{
    type Session = T::Session;

    async fn acquire(&self) -> Result<Self::Session, BoxError> {
        // Resolution happens before any await; the target reference is held
        // across acquisition, the map lock is not.
        let target = self.resolve();
        target.acquire().await
    }
}
