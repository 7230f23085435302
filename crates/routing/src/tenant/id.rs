//! Tenant identifier type.
//!
//! This module defines the [`TenantId`] type, an opaque identifier used as
//! the key into the routing map. Equality is exact, case-sensitive string
//! comparison.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The reserved identifier for the default connection target.
///
/// The default target is registered at router construction and always
/// resolvable; it backs every unit of work that runs without an active
/// tenant, or with a tenant that has no registered target. The reserved
/// identifier cannot be added or removed through the registry.
pub const DEFAULT_TARGET: &str = "__default__";

/// An opaque tenant identifier.
///
/// `TenantId` is an exact-match string key. The routing layer attaches no
/// structure to it beyond the single reserved value [`DEFAULT_TARGET`];
/// whether an id is a UUID, a slug, or a composite key is the embedding
/// application's business.
///
/// # Examples
///
/// ```
/// use switchyard_routing::TenantId;
///
/// let tenant = TenantId::new("acme");
/// assert_eq!(tenant.as_str(), "acme");
/// assert!(!tenant.is_default_target());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a new tenant ID from the given string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the reserved ID of the default connection target.
    pub fn default_target() -> Self {
        Self(DEFAULT_TARGET.to_string())
    }

    /// Returns the tenant ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this is the reserved default-target ID.
    pub fn is_default_target(&self) -> bool {
        self.0 == DEFAULT_TARGET
    }

    /// Returns `true` if the ID is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TenantId({})", self.0)
    }
}

impl FromStr for TenantId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TenantId::new(s))
    }
}

impl From<&str> for TenantId {
    fn from(s: &str) -> Self {
        TenantId::new(s)
    }
}

impl From<String> for TenantId {
    fn from(s: String) -> Self {
        TenantId::new(s)
    }
}

impl From<&TenantId> for TenantId {
    fn from(id: &TenantId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Allows `&str` lookups in maps keyed by `TenantId`.
impl Borrow<str> for TenantId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TenantId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TenantId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_id_creation() {
        let tenant = TenantId::new("my-tenant");
        assert_eq!(tenant.as_str(), "my-tenant");
        assert!(!tenant.is_empty());
    }

    #[test]
    fn test_default_target() {
        let default = TenantId::default_target();
        assert!(default.is_default_target());
        assert_eq!(default.as_str(), DEFAULT_TARGET);
    }

    #[test]
    fn test_exact_case_sensitive_equality() {
        assert_eq!(TenantId::new("Acme"), TenantId::new("Acme"));
        assert_ne!(TenantId::new("Acme"), TenantId::new("acme"));
    }

    #[test]
    fn test_display_and_debug() {
        let tenant = TenantId::new("acme");
        assert_eq!(tenant.to_string(), "acme");
        assert_eq!(format!("{:?}", tenant), "TenantId(acme)");
    }

    #[test]
    fn test_serde_roundtrip() {
        let tenant = TenantId::new("acme");
        let json = serde_json::to_string(&tenant).unwrap();
        assert_eq!(json, "\"acme\"");

        let parsed: TenantId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tenant);
    }

    #[test]
    fn test_from_string() {
        let tenant: TenantId = "my-tenant".into();
        assert_eq!(tenant.as_str(), "my-tenant");

        let tenant2: TenantId = String::from("my-tenant").into();
        assert_eq!(tenant2, tenant);
    }

    #[test]
    fn test_str_lookup_via_borrow() {
        use std::collections::HashMap;

        let mut map: HashMap<TenantId, u32> = HashMap::new();
        map.insert(TenantId::new("acme"), 1);
        assert_eq!(map.get("acme"), Some(&1));
        assert_eq!(map.get("other"), None);
    }
}
