//! Error types for the routing layer.
//!
//! The taxonomy has three categories, each surfaced to the direct caller and
//! never retried here:
//!
//! - [`InvalidArgument`] — malformed tenant id on `add`/`remove`, or an
//!   attempt to remove the reserved default target.
//! - [`ResourceUnavailable`] — the connection collaborator could not produce
//!   a session for the resolved target.
//! - [`UnitOfWorkFailure`] — the unit of work raised an error or the
//!   transaction failed; carries the original error unmodified.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::error::Error as StdError;

use thiserror::Error;

use crate::tenant::TenantId;

/// A boxed error produced by an external collaborator or a unit of work.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A convenience result type for routing operations.
pub type RouterResult<T> = Result<T, RouterError>;

/// The primary error type for all routing operations.
#[derive(Error, Debug)]
pub enum RouterError {
    /// Malformed input at the registry boundary.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    /// The connection collaborator failed to produce a session.
    #[error(transparent)]
    ResourceUnavailable(#[from] ResourceUnavailable),

    /// The unit of work or its transactional boundary failed.
    #[error(transparent)]
    UnitOfWorkFailure(#[from] UnitOfWorkFailure),
}

impl RouterError {
    /// Unwraps the original unit-of-work error, if this is one.
    ///
    /// The error is returned exactly as the work produced it; nothing is
    /// wrapped, rewritten, or swallowed on the way out of
    /// [`execute`](crate::TenantExecutor::execute).
    pub fn into_work_error(self) -> Result<BoxError, Self> {
        match self {
            RouterError::UnitOfWorkFailure(failure) => Ok(failure.into_inner()),
            other => Err(other),
        }
    }
}

/// Errors for malformed registry input.
#[derive(Error, Debug)]
pub enum InvalidArgument {
    /// The tenant id is the empty string.
    #[error("tenant id must not be empty")]
    EmptyTenantId,

    /// The tenant id violates the configured length or pattern bounds.
    #[error("malformed tenant id '{tenant_id}': {reason}")]
    MalformedTenantId { tenant_id: String, reason: String },

    /// The reserved default-target id was passed to `add` or `remove`.
    #[error("tenant id '{tenant_id}' is reserved for the default target")]
    ReservedTenantId { tenant_id: TenantId },

    /// The configured tenant id pattern is not a valid regex.
    #[error("invalid tenant id pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// The connection collaborator could not produce a session for the target
/// resolved for `tenant`.
#[derive(Error, Debug)]
#[error("could not acquire a session for tenant '{tenant}'")]
pub struct ResourceUnavailable {
    /// The tenant the failing unit of work was bound to.
    pub tenant: TenantId,
    /// The collaborator's error.
    #[source]
    pub source: BoxError,
}

/// A unit of work raised an error, or its transaction failed to begin or
/// commit.
///
/// The original error is carried unmodified; use
/// [`into_inner`](UnitOfWorkFailure::into_inner) to recover it, or
/// [`source`](StdError::source) to inspect it in place.
#[derive(Error, Debug)]
#[error("unit of work failed")]
pub struct UnitOfWorkFailure {
    #[source]
    source: BoxError,
}

impl UnitOfWorkFailure {
    /// Wraps an error raised inside a bound execution.
    pub fn new(source: BoxError) -> Self {
        Self { source }
    }

    /// Returns the original error, unmodified.
    pub fn into_inner(self) -> BoxError {
        self.source
    }

    /// Borrows the original error.
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.source.as_ref()
    }
}
