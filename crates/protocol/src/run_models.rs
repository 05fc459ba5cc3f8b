//! Runtime state models for a generation run.
//!
//! A [`PipelineRun`] is the complete, render-ready snapshot of one build
//! attempt. It is produced by folding stream events in arrival order and
//! carries no behavior of its own.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Terminal outcome reported by the backend.
///
/// Appears in `step_complete` and `done` payloads. Serialized lowercase
/// to match the wire format (`"success"` / `"failed"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failed,
}

/// Lifecycle status of a single pipeline step.
///
/// Steps the run has not seen yet are `Pending`; a `step_start` moves a
/// step to `Running` and a `step_complete` settles it on the reported
/// outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Running,
    Success,
    Failed,
}

impl From<Outcome> for StepStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => StepStatus::Success,
            Outcome::Failed => StepStatus::Failed,
        }
    }
}

/// A single line in the run's log feed.
///
/// `level` is an open set: the backend currently emits `"info"` and
/// `"error"`, but unknown levels are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
}

impl LogEntry {
    /// An `info`-level entry.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: "info".to_string(),
            message: message.into(),
        }
    }

    /// An `error`-level entry.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: "error".to_string(),
            message: message.into(),
        }
    }
}

/// A file the backend finished generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct FileArtifact {
    pub filename: String,
    /// Size in bytes, when the backend reports one.
    #[ts(type = "number | null")]
    pub size: Option<u64>,
}

/// Complete state of one build attempt.
///
/// This is the value a dashboard renders: the fold over all stream events
/// received so far. Field names serialize in camelCase for TypeScript
/// consumers.
///
/// Flag combinations:
/// - `is_building: true` means events are still expected.
/// - `is_done: true` means a `done` event reported success.
/// - Both `false` with populated logs means the run failed or was
///   interrupted; the collected state stays readable either way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRun {
    /// A run is in progress and further events are expected.
    pub is_building: bool,

    /// The run finished successfully.
    pub is_done: bool,

    /// Step named by the most recent `step_start`, or the seeded first
    /// step right after a run begins. `None` once the run finishes.
    pub active_step: Option<String>,

    /// Per-step status, keyed by step name. Steps never mentioned by any
    /// event are simply absent.
    pub step_statuses: HashMap<String, StepStatus>,

    /// Append-only log feed, in arrival order.
    pub logs: Vec<LogEntry>,

    /// Append-only list of generated files, in arrival order.
    pub files: Vec<FileArtifact>,
}

impl PipelineRun {
    /// Status of `step`, defaulting to [`StepStatus::Pending`] for steps
    /// no event has mentioned.
    pub fn step_status(&self, step: &str) -> StepStatus {
        self.step_statuses
            .get(step)
            .copied()
            .unwrap_or(StepStatus::Pending)
    }
}
