//! SinkPair - the two per-session sinks behind one closable handle

use std::sync::Arc;

use contracts::{ChannelTag, ContractError, RecordSink};
use tokio::sync::Mutex;
use tracing::{debug, error};

/// The two output sinks of one session, shared between its run loop (which
/// writes) and the registry (which closes).
///
/// Closing while a write is in flight is expected: the operations serialize
/// on the internal lock, and a write that loses the race fails with
/// [`ContractError::SinkClosed`] instead of corrupting state.
pub struct SinkPair<S> {
    inner: Arc<Mutex<PairInner<S>>>,
}

struct PairInner<S> {
    stdout: Option<S>,
    stderr: Option<S>,
}

impl<S> Clone for SinkPair<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: RecordSink> SinkPair<S> {
    pub fn new(stdout: S, stderr: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PairInner {
                stdout: Some(stdout),
                stderr: Some(stderr),
            })),
        }
    }

    /// Append payload bytes to the sink matching the channel tag.
    pub async fn write_to(&self, tag: ChannelTag, payload: &[u8]) -> Result<(), ContractError> {
        let mut inner = self.inner.lock().await;
        let slot = match tag {
            ChannelTag::Stdout => &mut inner.stdout,
            ChannelTag::Stderr => &mut inner.stderr,
        };
        match slot {
            Some(sink) => sink.write(payload).await,
            None => Err(ContractError::SinkClosed {
                channel: tag.as_str().to_string(),
            }),
        }
    }

    /// Flush and drop both sinks.
    ///
    /// Idempotent; subsequent writes fail with a sink-closed error.
    pub async fn close_all(&self) {
        let mut inner = self.inner.lock().await;
        for sink in [inner.stdout.take(), inner.stderr.take()]
            .into_iter()
            .flatten()
        {
            close_sink(sink).await;
        }
    }

    /// Whether `close_all` has run.
    pub async fn is_closed(&self) -> bool {
        let inner = self.inner.lock().await;
        inner.stdout.is_none() && inner.stderr.is_none()
    }
}

async fn close_sink<S: RecordSink>(mut sink: S) {
    if let Err(e) = sink.flush().await {
        error!(sink = sink.name(), error = %e, "flush failed on close");
    }
    if let Err(e) = sink.close().await {
        error!(sink = sink.name(), error = %e, "close failed");
    }
    debug!(sink = sink.name(), "sink closed");
}
