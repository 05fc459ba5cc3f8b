//! Session manager for the current generation run.
//!
//! The StudioSession is the single owner of run state. It opens the stream
//! for a new run, folds every received event into the state, and exposes
//! the result as a watchable value that any number of renderers can
//! observe without ever writing to it.

use crate::config::models::StudioConfig;
use crate::state::run::{apply_event, reset_run};
use crate::stream::client::{ConnectionHandle, StreamClient, StreamError};
use bs_protocol::{GenerationRequest, PipelineRun, WORKFLOW_STEPS};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use url::Url;
use uuid::Uuid;

/// Capacity of the per-run event channel between transport and fold.
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Owns the state and transport of the current pipeline run.
///
/// At most one run is live at a time. Starting a new run supersedes the
/// previous one: its fold task is stopped and awaited before the state is
/// touched, so an event from a stale channel can never reach the new
/// run's state.
pub struct StudioSession {
    /// Client used to open one stream per run.
    client: StreamClient,

    /// Canonical step sequence; only the first element is read, to seed
    /// `active_step` when a run begins.
    pipeline: Vec<String>,

    /// Writer side of the observable run state.
    state_tx: watch::Sender<PipelineRun>,

    /// Transport and fold task of the live run, if any.
    active: Option<ActiveRun>,
}

/// Connection and consumer task of one live run.
struct ActiveRun {
    /// Correlates this run's log lines; never part of the run state.
    run_id: Uuid,
    connection: ConnectionHandle,
    pump: JoinHandle<()>,
}

impl StudioSession {
    /// Create a session for the backend named by `config`.
    ///
    /// # Errors
    ///
    /// Returns `StreamError` if the configured backend URL is unusable or
    /// the HTTP client cannot be built.
    pub fn new(config: &StudioConfig) -> Result<Self, StreamError> {
        let (state_tx, _) = watch::channel(PipelineRun::default());

        Ok(Self {
            client: StreamClient::new(config)?,
            pipeline: WORKFLOW_STEPS.iter().map(|s| s.to_string()).collect(),
            state_tx,
            active: None,
        })
    }

    /// Replace the canonical step sequence used to seed `active_step`.
    ///
    /// The sequence itself is display data owned by the rendering layer;
    /// the session never constrains incoming step names to it.
    pub fn with_pipeline(mut self, steps: Vec<String>) -> Self {
        self.pipeline = steps;
        self
    }

    /// Subscribe to run state changes.
    ///
    /// The watch channel keeps only the latest snapshot, so a slow
    /// renderer observes coalesced intermediate states while the final
    /// state is always delivered.
    pub fn subscribe(&self) -> watch::Receiver<PipelineRun> {
        self.state_tx.subscribe()
    }

    /// Current snapshot of the run state.
    pub fn current(&self) -> PipelineRun {
        self.state_tx.borrow().clone()
    }

    /// Whether the current run is still building.
    pub fn is_building(&self) -> bool {
        self.state_tx.borrow().is_building
    }

    /// Whether the live run's transport is still open.
    pub fn is_connected(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| !active.connection.is_closed())
    }

    /// Download URL for the packaged project.
    ///
    /// Meaningful once the run state reports `is_done`.
    pub fn download_url(&self, project_name: &str) -> Url {
        self.client.download_url(project_name)
    }

    /// Start a new generation run, superseding any live one.
    ///
    /// The previous run's connection and fold task are released first and
    /// the fold task is awaited to completion, then the state is reset
    /// with `active_step` seeded from the first canonical step, and only
    /// then does the new stream open. Events are folded in arrival order
    /// on a background task; progress is visible through
    /// [`subscribe`](Self::subscribe) immediately.
    pub async fn start_run(&mut self, request: &GenerationRequest) {
        self.release_active().await;

        let run_id = Uuid::new_v4();
        tracing::info!(
            run_id = %run_id,
            project_name = %request.project_name,
            "starting generation run"
        );

        let first_step = self.pipeline.first().cloned();
        self.state_tx
            .send_modify(|run| reset_run(run, first_step.as_deref()));

        let (events_tx, mut events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let connection = self.client.open(request, events_tx);

        let state_tx = self.state_tx.clone();
        let pump = tokio::spawn(async move {
            while let Some(event) = events_rx.recv().await {
                state_tx.send_modify(|run| apply_event(run, &event));
            }
            tracing::debug!(run_id = %run_id, "event channel closed");
        });

        self.active = Some(ActiveRun {
            run_id,
            connection,
            pump,
        });
    }

    /// Close the live run's transport, if any.
    ///
    /// The run state stays readable exactly as it was when the last event
    /// was folded. Closing an already closed or never-started session has
    /// no effect.
    pub async fn close(&mut self) {
        self.release_active().await;
    }

    /// Tear down the live run and wait for its fold task to finish.
    ///
    /// An abort lands only at the task's next yield point; a pump with
    /// buffered events keeps folding until then. Once this returns,
    /// nothing from the released run writes state again.
    async fn release_active(&mut self) {
        if let Some(active) = self.active.take() {
            active.pump.abort();
            active.connection.close();
            let _ = active.pump.await;
            tracing::debug!(run_id = %active.run_id, "released run transport");
        }
    }
}

impl Drop for StudioSession {
    fn drop(&mut self) {
        // No awaiting in drop; the aborted tasks wind down on their own.
        if let Some(active) = self.active.take() {
            active.pump.abort();
            active.connection.close();
        }
    }
}
