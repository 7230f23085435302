//! Connection-target integrations for common pool crates.
//!
//! Each integration is behind a feature flag and adapts one pooling crate to
//! the [`ConnectionSource`](crate::ConnectionSource) /
//! [`Session`](crate::Session) seams. The routing core works with any
//! implementation of those traits; nothing here is required.

#[cfg(feature = "postgres")]
pub mod postgres;
