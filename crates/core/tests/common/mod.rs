//! Common test utilities for stream and session tests.
//!
//! This module provides shared functionality across integration tests:
//! - Mock backend builders speaking the SSE stream protocol
//! - Canned event scripts
//! - Event collection helpers

pub mod fixtures;

#[allow(unused_imports)]
pub use fixtures::*;
