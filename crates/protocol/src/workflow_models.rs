//! Workflow step data and the generation request.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Canonical ordered steps of the generation workflow.
///
/// This mirrors the pipeline rail a dashboard renders. The order is
/// display data, not a constraint: the run state accepts whatever step
/// names the backend emits. The core itself reads only the first element,
/// to seed the active step when a run begins.
pub const WORKFLOW_STEPS: [&str; 11] = [
    "scaffold_project",
    "plan_files",
    "define_agents",
    "configure_agents",
    "design_api",
    "implement_api",
    "generate_all_files",
    "validate_code",
    "security_scan",
    "optimize_workflow",
    "deployment",
];

/// First element of [`WORKFLOW_STEPS`].
pub fn first_workflow_step() -> &'static str {
    WORKFLOW_STEPS[0]
}

/// Caller-supplied parameters for one generation run.
///
/// `prompt` is the free-text description of the agent to build and
/// `project_name` identifies the project; both travel as query parameters
/// on the stream endpoint, and `project_name` also names the downloadable
/// artifact once the run succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct GenerationRequest {
    pub prompt: String,
    pub project_name: String,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, project_name: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            project_name: project_name.into(),
        }
    }
}
