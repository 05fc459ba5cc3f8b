//! # bs-protocol
//!
//! Core protocol definitions and data models for BotSmith.
//!
//! This crate defines all shared data structures used for:
//! - Decoding the server-sent event stream of a generation run
//! - Representing run state as a render-ready snapshot
//! - Describing the canonical workflow shown by dashboards
//!
//! ## Modules
//!
//! - [`stream_events`]: The wire event union pushed by the backend
//! - [`run_models`]: Run state, step statuses, logs and file artifacts
//! - [`workflow_models`]: Canonical step list and the generation request
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, serde_json and ts-rs
//! - TypeScript generation: All types derive `TS` for client compatibility
//! - Independent compilation: No dependencies on other BotSmith crates

pub mod run_models;
pub mod stream_events;
pub mod workflow_models;

// Re-export all public types for convenience
pub use run_models::*;
pub use stream_events::*;
pub use workflow_models::*;
