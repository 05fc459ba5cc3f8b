//! Streaming client for the generation endpoint.
//!
//! The backend reports build progress over a one-directional server-sent
//! event channel. [`StreamClient::open`] starts one connection per run and
//! forwards every decoded [`StreamEvent`] to a single registered handler,
//! in arrival order, until the backend says `done` or the transport fails.

use std::time::Duration;

use bs_protocol::{GenerationRequest, StreamEvent};
use eventsource_stream::Eventsource;
use futures::StreamExt;
use reqwest::Client;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use url::Url;

use crate::config::models::StudioConfig;

/// User-Agent string for all backend requests.
const USER_AGENT: &str = concat!("botsmith-core/", env!("CARGO_PKG_VERSION"));

/// Timeout for establishing the TCP connection to the backend.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Message carried by the synthetic `error` event when the transport drops.
const CONNECTION_LOST: &str = "Connection lost";

/// Errors that can occur while constructing a [`StreamClient`].
///
/// Transport failures during a run never surface here; the stream task
/// reports them to the handler as a synthetic `error` event instead.
#[derive(Error, Debug)]
pub enum StreamError {
    /// The configured backend URL does not parse as an absolute URL.
    #[error("Invalid backend URL {url:?}: {source}")]
    InvalidBaseUrl { url: String, source: url::ParseError },

    /// The backend URL has no host/path structure to append endpoints to.
    #[error("Backend URL {url} cannot be used as a base")]
    OpaqueBaseUrl { url: Url },

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {source}")]
    ClientBuild { source: reqwest::Error },
}

/// Client for the backend's generation stream.
///
/// One client serves any number of runs; every [`open`](Self::open) call
/// produces an independent connection with its own handle.
pub struct StreamClient {
    client: Client,
    base_url: Url,
}

impl StreamClient {
    /// Creates a client for the backend named by `config`.
    pub fn new(config: &StudioConfig) -> Result<Self, StreamError> {
        let base_url =
            Url::parse(&config.backend.url).map_err(|source| StreamError::InvalidBaseUrl {
                url: config.backend.url.clone(),
                source,
            })?;
        if base_url.cannot_be_a_base() {
            return Err(StreamError::OpaqueBaseUrl { url: base_url });
        }

        // No overall request timeout: a healthy stream stays open for the
        // entire build.
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|source| StreamError::ClientBuild { source })?;

        Ok(Self { client, base_url })
    }

    /// Opens the event channel for one generation run.
    ///
    /// The connection lives on a spawned task. Decoded events are forwarded
    /// to `events_tx` in arrival order; malformed payloads are logged and
    /// dropped without disturbing the stream. After forwarding a `done`
    /// event the channel closes proactively. Every transport failure
    /// (refused connection, non-success status, broken or prematurely
    /// closed stream) is reported exactly once as a synthetic `error`
    /// event carrying "Connection lost", after which the channel closes.
    ///
    /// Dropping the returned [`ConnectionHandle`] closes the channel too.
    pub fn open(
        &self,
        request: &GenerationRequest,
        events_tx: mpsc::Sender<StreamEvent>,
    ) -> ConnectionHandle {
        let url = self.stream_url(request);
        let client = self.client.clone();
        let task = tokio::spawn(pump_stream(client, url, events_tx));
        ConnectionHandle { task }
    }

    /// URL of the packaged project for a finished run.
    ///
    /// Meaningful once the run reports `done` with a successful status.
    pub fn download_url(&self, project_name: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&self.endpoint_path(&format!("/bot/download/{project_name}")));
        url
    }

    /// Stream endpoint URL with the request encoded as query parameters.
    fn stream_url(&self, request: &GenerationRequest) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&self.endpoint_path("/bot/stream"));
        url.query_pairs_mut()
            .append_pair("prompt", &request.prompt)
            .append_pair("project_name", &request.project_name);
        url
    }

    /// Endpoint path under the configured base; a base URL may carry a
    /// path prefix and endpoints append to it.
    fn endpoint_path(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url.path().trim_end_matches('/'))
    }
}

/// Drives one connection, forwarding decoded events until the stream ends
/// or the handler goes away.
async fn pump_stream(client: Client, url: Url, events_tx: mpsc::Sender<StreamEvent>) {
    tracing::debug!(url = %url, "opening generation stream");

    let response = match client.get(url).send().await {
        Ok(response) => match response.error_for_status() {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(error = %error, "stream endpoint returned an error status");
                send_connection_lost(&events_tx).await;
                return;
            }
        },
        Err(error) => {
            tracing::warn!(error = %error, "failed to reach stream endpoint");
            send_connection_lost(&events_tx).await;
            return;
        }
    };

    let stream = response.bytes_stream().eventsource();
    let mut stream = std::pin::pin!(stream);

    loop {
        match stream.next().await {
            Some(Ok(message)) => {
                // Keep-alive frames carry no payload
                if message.data.is_empty() {
                    continue;
                }

                let event = match StreamEvent::from_payload(&message.data) {
                    Ok(event) => event,
                    Err(error) => {
                        tracing::warn!(
                            error = %error,
                            payload = %message.data,
                            "dropping malformed stream payload"
                        );
                        continue;
                    }
                };

                let terminal = event.is_terminal();
                if events_tx.send(event).await.is_err() {
                    tracing::debug!("event handler dropped, closing stream");
                    return;
                }
                if terminal {
                    tracing::debug!("run finished, closing stream");
                    return;
                }
            }
            Some(Err(error)) => {
                tracing::warn!(error = %error, "stream transport failed");
                send_connection_lost(&events_tx).await;
                return;
            }
            // A healthy stream ends only after `done`; EOF before that
            // means the connection dropped.
            None => {
                tracing::warn!("stream closed before the run finished");
                send_connection_lost(&events_tx).await;
                return;
            }
        }
    }
}

/// Delivers the single synthetic failure event for this connection.
async fn send_connection_lost(events_tx: &mpsc::Sender<StreamEvent>) {
    let event = StreamEvent::Error {
        message: CONNECTION_LOST.to_string(),
    };
    if events_tx.send(event).await.is_err() {
        tracing::debug!("event handler dropped before the connection loss was reported");
    }
}

/// Handle to the live connection of one run.
///
/// The channel closes on its own after a `done` event or a transport
/// failure; closing through the handle is for callers abandoning a run
/// early. Dropping the handle closes the channel as well, so a superseded
/// run always releases its transport.
#[derive(Debug)]
pub struct ConnectionHandle {
    task: JoinHandle<()>,
}

impl ConnectionHandle {
    /// Force-closes the channel. Repeated calls have no further effect.
    pub fn close(&self) {
        self.task.abort();
    }

    /// Whether the stream task has finished, for any reason.
    pub fn is_closed(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ConnectionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
