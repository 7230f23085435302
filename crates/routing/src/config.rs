//! Router configuration.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::InvalidArgument;
use crate::tenant::TenantId;

/// Configuration for a [`TenantRouter`](crate::TenantRouter).
///
/// Controls the bounds enforced on tenant ids at the registry boundary.
/// Ids are always required to be non-empty and distinct from the reserved
/// default-target id; the length bound and pattern are configurable.
///
/// # Example
///
/// ```
/// use switchyard_routing::RouterConfig;
///
/// let config = RouterConfig::new()
///     .with_max_tenant_id_length(32)
///     .with_tenant_id_pattern(r"^[a-z][a-z0-9-]*$");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Maximum length for tenant ids, in bytes.
    #[serde(default = "default_max_tenant_id_length")]
    pub max_tenant_id_length: usize,

    /// Allowed shape for tenant ids (regex pattern).
    #[serde(default = "default_tenant_id_pattern")]
    pub tenant_id_pattern: String,
}

fn default_max_tenant_id_length() -> usize {
    128
}

fn default_tenant_id_pattern() -> String {
    r"^[A-Za-z0-9][A-Za-z0-9_.:/-]*$".to_string()
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_tenant_id_length: default_max_tenant_id_length(),
            tenant_id_pattern: default_tenant_id_pattern(),
        }
    }
}

impl RouterConfig {
    /// Creates a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum tenant id length.
    pub fn with_max_tenant_id_length(mut self, max: usize) -> Self {
        self.max_tenant_id_length = max;
        self
    }

    /// Sets the tenant id pattern.
    pub fn with_tenant_id_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.tenant_id_pattern = pattern.into();
        self
    }
}

/// Compiled tenant-id checks, built once at router construction.
#[derive(Debug)]
pub(crate) struct TenantIdValidator {
    max_length: usize,
    pattern: Regex,
}

impl TenantIdValidator {
    /// The bounds of [`RouterConfig::default`].
    pub(crate) fn default_bounds() -> Self {
        Self {
            max_length: default_max_tenant_id_length(),
            pattern: Regex::new(&default_tenant_id_pattern())
                .expect("built-in pattern is valid"),
        }
    }

    pub(crate) fn compile(config: &RouterConfig) -> Result<Self, InvalidArgument> {
        let pattern = Regex::new(&config.tenant_id_pattern).map_err(|e| {
            InvalidArgument::InvalidPattern {
                pattern: config.tenant_id_pattern.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            max_length: config.max_tenant_id_length,
            pattern,
        })
    }

    /// Checks an id at the `add` boundary. The reserved default id is
    /// rejected before the pattern so callers get the specific error.
    pub(crate) fn validate(&self, id: &TenantId) -> Result<(), InvalidArgument> {
        if id.is_empty() {
            return Err(InvalidArgument::EmptyTenantId);
        }
        if id.is_default_target() {
            return Err(InvalidArgument::ReservedTenantId {
                tenant_id: id.clone(),
            });
        }
        if id.as_str().len() > self.max_length {
            return Err(InvalidArgument::MalformedTenantId {
                tenant_id: id.to_string(),
                reason: format!("exceeds maximum length of {} bytes", self.max_length),
            });
        }
        if !self.pattern.is_match(id.as_str()) {
            return Err(InvalidArgument::MalformedTenantId {
                tenant_id: id.to_string(),
                reason: format!("does not match pattern '{}'", self.pattern.as_str()),
            });
        }
        Ok(())
    }
}
