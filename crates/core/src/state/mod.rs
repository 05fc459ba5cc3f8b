//! State management for generation runs.
//!
//! This module provides:
//! - The pure fold from stream events onto run state
//! - StudioSession for owning the current run and its transport

pub mod manager;
pub mod run;
