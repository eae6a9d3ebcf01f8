//! SessionRegistry - thread-safe table of active sessions.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Arc;

use contracts::{ConfigError, SessionConfig};
use dispatcher::{DispatchMetrics, FileSink, MetricsSnapshot, RecordDispatcher, SinkPair};
use metrics::gauge;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::error::StartError;
use crate::session::{run_session, SessionState};
use crate::stream::StreamFactory;

/// Handle to one live session.
///
/// Holds the sink pair (shared with the run loop), the cancellation token
/// that closes the input side, and the loop's task handle. The task is
/// tracked but not supervised: `stop` triggers closure without waiting for
/// the loop to observe it.
pub struct SessionHandle {
    sinks: SinkPair<FileSink>,
    metrics: Arc<DispatchMetrics>,
    cancel: CancellationToken,
    task: JoinHandle<SessionState>,
}

/// Table of active sessions keyed by identifier.
///
/// Owned by the composition root and shared (behind `Arc`) with whatever
/// exposes the start/stop surface; the map is the only state shared across
/// tasks and every access goes through the lock. At most one live session
/// exists per identifier.
pub struct SessionRegistry<F> {
    streams: F,
    sessions: Mutex<HashMap<String, SessionHandle>>,
}

impl<F: StreamFactory + Sync> SessionRegistry<F> {
    pub fn new(streams: F) -> Self {
        Self {
            streams,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Start a session: validate config, open both sinks and the input
    /// stream, register, and launch the run loop.
    ///
    /// Returns as soon as the loop is spawned; it never waits for loop
    /// progress. On any error nothing stays registered and freshly opened
    /// sinks are closed again.
    #[instrument(name = "registry_start", skip(self, options), fields(session = %id))]
    pub async fn start(&self, id: &str, options: &HashMap<String, String>) -> Result<(), StartError> {
        if self.is_active(id).await {
            return Err(StartError::AlreadyActive { id: id.to_string() });
        }

        let config = SessionConfig::from_options(options)
            .map_err(|ConfigError::MissingOption { key }| StartError::MissingOption { key })?;

        let stdout = open_sink("stdout", &config.stdout)?;
        let stderr = open_sink("stderr", &config.stderr)?;
        let sinks = SinkPair::new(stdout, stderr);

        let stream = match self.streams.open(id).await {
            Ok(stream) => stream,
            Err(source) => {
                sinks.close_all().await;
                return Err(StartError::StreamOpenFailed {
                    name: id.to_string(),
                    source,
                });
            }
        };

        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(id) {
            // Lost a start/start race; the winner's session stays untouched.
            sinks.close_all().await;
            return Err(StartError::AlreadyActive { id: id.to_string() });
        }

        let metrics = Arc::new(DispatchMetrics::new());
        let dispatcher = RecordDispatcher::with_metrics(id, sinks.clone(), Arc::clone(&metrics));
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_session(
            id.to_string(),
            stream,
            dispatcher,
            cancel.clone(),
        ));

        sessions.insert(
            id.to_string(),
            SessionHandle {
                sinks,
                metrics,
                cancel,
                task,
            },
        );
        gauge!("logdemux_sessions_active").increment(1.0);

        info!(
            stdout = %config.stdout.display(),
            stderr = %config.stderr.display(),
            "session started"
        );
        Ok(())
    }

    /// Stop a session: close its input stream and both sinks and free the
    /// identifier. Idempotent; unknown identifiers are a silent no-op.
    ///
    /// Triggers closure without waiting for the loop task to observe it; a
    /// write racing the close surfaces inside the loop as a sink-closed
    /// write error. Callers that need "stopped means flushed" use
    /// [`stop_and_wait`](Self::stop_and_wait).
    #[instrument(name = "registry_stop", skip(self), fields(session = %id))]
    pub async fn stop(&self, id: &str) {
        let Some(handle) = self.remove(id).await else {
            debug!("stop for unknown session, ignoring");
            return;
        };
        handle.cancel.cancel();
        handle.sinks.close_all().await;
        info!("session stopped");
    }

    /// Like [`stop`](Self::stop), but joins the loop task before closing the
    /// sinks, so every record decoded before closure is flushed.
    ///
    /// Returns the loop's final state, or `None` for an unknown identifier.
    #[instrument(name = "registry_stop_and_wait", skip(self), fields(session = %id))]
    pub async fn stop_and_wait(&self, id: &str) -> Option<SessionState> {
        let handle = self.remove(id).await?;
        handle.cancel.cancel();
        let state = match handle.task.await {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "session task did not finish cleanly");
                SessionState::Closed
            }
        };
        handle.sinks.close_all().await;
        info!(?state, "session stopped");
        Some(state)
    }

    /// Whether a session is currently registered under `id`.
    ///
    /// A session that drained to end-of-stream still counts: its entry stays
    /// until an explicit `stop` frees the identifier.
    pub async fn is_active(&self, id: &str) -> bool {
        self.sessions.lock().await.contains_key(id)
    }

    /// Number of registered sessions.
    pub async fn active_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Dispatch counters for one session, if registered.
    pub async fn metrics(&self, id: &str) -> Option<MetricsSnapshot> {
        let sessions = self.sessions.lock().await;
        sessions.get(id).map(|h| h.metrics.snapshot())
    }

    async fn remove(&self, id: &str) -> Option<SessionHandle> {
        let handle = self.sessions.lock().await.remove(id);
        if handle.is_some() {
            gauge!("logdemux_sessions_active").decrement(1.0);
        }
        handle
    }
}

/// Open one sink destination, checking that its parent directory exists.
fn open_sink(channel: &'static str, path: &Path) -> Result<FileSink, StartError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let sink_open_failed = |source: io::Error| StartError::SinkOpenFailed {
        path: path.to_path_buf(),
        source,
    };

    let meta = std::fs::metadata(parent).map_err(sink_open_failed)?;
    if !meta.is_dir() {
        return Err(sink_open_failed(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("'{}' is not a directory", parent.display()),
        )));
    }

    FileSink::create(channel, path).map_err(sink_open_failed)
}
