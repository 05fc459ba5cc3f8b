//! Wire events for the generation stream.
//!
//! While a build runs, the backend pushes one-directional server-sent
//! events. Every message body is a JSON envelope of the form
//! `{"type": "<event>", "data": {...}}`; this module defines the tagged
//! union those envelopes decode into.
//!
//! The stream is append-only and ordered: consumers fold events in
//! arrival order and never reply on this channel.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::run_models::{FileArtifact, LogEntry, Outcome};

/// Events pushed by the backend while a generation run executes.
///
/// Serialization matches the wire envelope, e.g.:
///
/// ```json
/// {"type": "step_start", "data": {"step": "plan_files"}}
/// {"type": "done", "data": {"status": "success"}}
/// ```
///
/// Payloads with an unknown `type` or a malformed `data` body fail to
/// decode; consumers drop them without disturbing the stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum StreamEvent {
    /// The backend compiled a workflow and is about to execute it.
    ///
    /// Informational only: carries the workflow name (when the backend
    /// knows one) and the number of planned steps. Run state is driven
    /// entirely by the step events that follow.
    WorkflowStart { name: Option<String>, steps: u32 },

    /// A pipeline step began executing.
    StepStart { step: String },

    /// A pipeline step finished with the reported outcome.
    StepComplete { step: String, status: Outcome },

    /// A log line from the backend.
    Log(LogEntry),

    /// The backend started generating a file.
    FileStart { filename: String },

    /// The backend finished generating a file.
    FileComplete(FileArtifact),

    /// The run is over. `Success` marks a completed build; `Failed`
    /// follows an `error` event on the backend's failure path.
    Done { status: Outcome },

    /// Something went wrong. Not terminal by itself: the backend sends a
    /// `done` with `Failed` afterwards when the whole run is giving up.
    Error { message: String },
}

impl StreamEvent {
    /// Decode a single wire payload.
    ///
    /// The stream client calls this on every message body; an `Err` marks
    /// the payload as malformed and the caller drops it.
    pub fn from_payload(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }

    /// Whether this event ends the run's building phase.
    ///
    /// Only `done` is terminal. An `error` leaves the run in progress so
    /// that a subsequent `done` can settle it.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Done { .. })
    }
}
