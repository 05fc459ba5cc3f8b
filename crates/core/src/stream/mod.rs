//! Server-sent event transport for generation runs.
//!
//! This module provides:
//! - The streaming client that opens `/bot/stream` connections
//! - Connection handles for closing a run's channel early

pub mod client;
