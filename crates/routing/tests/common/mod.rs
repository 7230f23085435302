//! Test infrastructure for the routing crate.
//!
//! Provides a stub connection target and session with failure injection and
//! recorded transaction activity, so routing and execution behavior can be
//! asserted without a database.

// Each test binary uses a different subset of the harness.
#![allow(dead_code)]

pub mod harness;

pub use harness::*;
