//! # bs-core
//!
//! Stream consumption and run state management for the BotSmith dashboard.
//!
//! This crate provides:
//! - Configuration loading from the `.botsmith/` directory
//! - A streaming client for the backend's generation endpoint
//! - The pure event fold that projects stream events onto run state
//! - Session management exposing the current run as a watchable value
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`stream`]: Server-sent event client for the generation endpoint
//! - [`state`]: Run state fold and session management

pub mod config;
pub mod state;
pub mod stream;
