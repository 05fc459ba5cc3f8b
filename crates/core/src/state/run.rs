//! Pure fold of stream events onto run state.
//!
//! Rendering layers read [`PipelineRun`] snapshots; this module is the
//! only place that writes them. The fold is total: every decoded event
//! maps to exactly one state change (or none), with no I/O and no failure
//! path, so the same event sequence always produces the same state.

use bs_protocol::{LogEntry, Outcome, PipelineRun, StepStatus, StreamEvent};

/// Resets `run` for a fresh build attempt.
///
/// Collections start empty, the flags flip to "building", and
/// `active_step` seeds from `first_step` so a dashboard can highlight the
/// first rail entry before the backend's first `step_start` arrives.
pub fn reset_run(run: &mut PipelineRun, first_step: Option<&str>) {
    run.is_building = true;
    run.is_done = false;
    run.active_step = first_step.map(str::to_string);
    run.step_statuses.clear();
    run.logs.clear();
    run.files.clear();
}

/// Folds one stream event into `run`.
///
/// Events apply in arrival order. Step names are accepted as-is, whether
/// or not they appear in the canonical workflow. `logs` and `files` only
/// ever grow; a later `step_complete` overwrites an earlier status for
/// the same step, and a later `step_start` sets it back to running.
pub fn apply_event(run: &mut PipelineRun, event: &StreamEvent) {
    match event {
        // Informational; the step rail is driven by step events alone.
        StreamEvent::WorkflowStart { .. } => {}
        StreamEvent::StepStart { step } => {
            run.active_step = Some(step.clone());
            run.step_statuses.insert(step.clone(), StepStatus::Running);
        }
        StreamEvent::StepComplete { step, status } => {
            run.step_statuses
                .insert(step.clone(), StepStatus::from(*status));
        }
        StreamEvent::Log(entry) => {
            run.logs.push(entry.clone());
        }
        StreamEvent::FileStart { filename } => {
            run.logs.push(LogEntry::info(format!("Generating {filename}...")));
        }
        StreamEvent::FileComplete(artifact) => {
            run.files.push(artifact.clone());
        }
        StreamEvent::Done { status } => {
            run.is_building = false;
            run.is_done = *status == Outcome::Success;
            run.active_step = None;
        }
        // Not terminal: only `done` ends the building phase.
        StreamEvent::Error { message } => {
            run.logs.push(LogEntry::error(message.clone()));
        }
    }
}
