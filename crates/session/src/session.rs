//! Per-session run loop.

use codec::FrameDecoder;
use contracts::RecordSink;
use dispatcher::RecordDispatcher;
use metrics::counter;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::stream::ByteStream;

/// Run-loop states. Transitions are one-way; a finished session can only be
/// replaced by a fresh `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Reading and dispatching frames.
    Running,
    /// End-of-stream observed; the input side is being closed.
    Draining,
    /// Terminal: the loop has exited and the input stream is dropped.
    Closed,
}

/// Consecutive decode failures tolerated before a session is abandoned.
///
/// The reference behavior resynchronizes forever, so a stream that yields
/// errors without ever reaching EOF would spin the loop indefinitely.
/// Bounding the run turns that into a fatal session error.
pub const MAX_CONSECUTIVE_DECODE_ERRORS: u32 = 64;

/// Decode-and-dispatch loop for one session.
///
/// Runs until the stream ends, the decode-error bound trips, or `cancel`
/// fires. Per-record faults (unknown tag, failed write) cost the record,
/// never the loop. The sinks are not closed here; only `stop` closes them.
pub(crate) async fn run_session<S: RecordSink + Send + 'static>(
    id: String,
    stream: ByteStream,
    dispatcher: RecordDispatcher<S>,
    cancel: CancellationToken,
) -> SessionState {
    let mut decoder = FrameDecoder::new(stream);
    let mut state = SessionState::Running;
    let mut consecutive_errors: u32 = 0;

    debug!(session = %id, "session loop started");

    while state == SessionState::Running {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                // Stopped from outside: drop the stream without touching the
                // sinks again, even if undecoded bytes remain.
                debug!(session = %id, "session stopped, closing input");
                state = SessionState::Closed;
            }
            decoded = decoder.next() => match decoded {
                Ok(Some(record)) => {
                    consecutive_errors = 0;
                    let _ = dispatcher.dispatch(&record).await;
                }
                Ok(None) => {
                    debug!(session = %id, "end of stream, draining");
                    state = SessionState::Draining;
                }
                Err(e) => {
                    consecutive_errors += 1;
                    counter!("logdemux_decode_errors_total").increment(1);
                    warn!(
                        session = %id,
                        error = %e,
                        consecutive = consecutive_errors,
                        "frame decode failed, resynchronizing"
                    );
                    if consecutive_errors >= MAX_CONSECUTIVE_DECODE_ERRORS {
                        error!(session = %id, "decode error bound reached, abandoning session");
                        state = SessionState::Draining;
                    } else {
                        decoder.reset();
                    }
                }
            }
        }
    }

    if state == SessionState::Draining {
        // Close the input side only. The sinks and the registry entry stay
        // until an explicit stop frees the identifier.
        state = SessionState::Closed;
    }

    drop(decoder);
    info!(session = %id, "session loop closed");
    state
}
