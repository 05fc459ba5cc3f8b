//! Test fixtures for stream and session tests.
//!
//! Builds mock backends that speak the generation stream protocol: JSON
//! envelopes framed as server-sent events, one `data:` frame per event.

use std::time::Duration;

use bs_core::config::models::{BackendConfig, StudioConfig};
use bs_protocol::StreamEvent;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config pointing at a mock backend.
#[allow(dead_code)]
pub fn config_for(server: &MockServer) -> StudioConfig {
    StudioConfig {
        backend: BackendConfig { url: server.uri() },
    }
}

/// Render event envelopes as a server-sent-events body.
#[allow(dead_code)]
pub fn sse_body(events: &[Value]) -> String {
    events
        .iter()
        .map(|event| format!("data: {event}\n\n"))
        .collect()
}

/// Response template carrying the given events as an SSE body.
#[allow(dead_code)]
pub fn stream_response(events: &[Value]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(sse_body(events), "text/event-stream")
}

/// Mount the stream endpoint answering every request with `events`.
#[allow(dead_code)]
pub async fn mount_stream(server: &MockServer, events: &[Value]) {
    Mock::given(method("GET"))
        .and(path("/bot/stream"))
        .respond_with(stream_response(events))
        .mount(server)
        .await;
}

/// Mount the stream endpoint for one project name only.
#[allow(dead_code)]
pub async fn mount_stream_for_project(
    server: &MockServer,
    project_name: &str,
    response: ResponseTemplate,
) {
    Mock::given(method("GET"))
        .and(path("/bot/stream"))
        .and(query_param("project_name", project_name))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Event script for a two-step run that succeeds and produces one file.
#[allow(dead_code)]
pub fn successful_run_script() -> Vec<Value> {
    vec![
        json!({"type": "workflow_start", "data": {"name": "support_bot", "steps": 2}}),
        json!({"type": "step_start", "data": {"step": "scaffold_project"}}),
        json!({"type": "log", "data": {"level": "info", "message": "Scaffolding project"}}),
        json!({"type": "step_complete", "data": {"step": "scaffold_project", "status": "success"}}),
        json!({"type": "step_start", "data": {"step": "generate_all_files"}}),
        json!({"type": "file_start", "data": {"filename": "agent.py"}}),
        json!({"type": "file_complete", "data": {"filename": "agent.py", "size": 2048}}),
        json!({"type": "step_complete", "data": {"step": "generate_all_files", "status": "success"}}),
        json!({"type": "done", "data": {"status": "success"}}),
    ]
}

/// Collect forwarded events until the channel closes or `timeout` elapses.
#[allow(dead_code)]
pub async fn collect_stream_events(
    mut rx: mpsc::Receiver<StreamEvent>,
    timeout: Duration,
) -> Vec<StreamEvent> {
    let mut events = Vec::new();
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        match tokio::time::timeout_at(deadline, rx.recv()).await {
            Ok(Some(event)) => events.push(event),
            // Channel closed: the stream task is finished with this run
            Ok(None) => break,
            Err(_) => break,
        }
    }

    events
}

/// Number of synthetic connection-loss errors in a captured sequence.
#[allow(dead_code)]
pub fn connection_lost_count(events: &[StreamEvent]) -> usize {
    events
        .iter()
        .filter(|event| {
            matches!(event, StreamEvent::Error { message } if message == "Connection lost")
        })
        .count()
}
