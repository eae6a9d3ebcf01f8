//! RecordDispatcher - routes decoded records to the session's sinks

use std::sync::Arc;

use contracts::{ChannelTag, LogRecord, RecordSink};
use metrics::counter;
use tracing::{error, warn};

use crate::error::DispatchError;
use crate::metrics::DispatchMetrics;
use crate::pair::SinkPair;

/// Routes each record's payload to the sink matching its channel tag.
///
/// Dispatch order equals decode order: one record is fully written before
/// the next is examined, with no reordering or batching across sinks.
pub struct RecordDispatcher<S> {
    session: String,
    sinks: SinkPair<S>,
    metrics: Arc<DispatchMetrics>,
}

impl<S: RecordSink> RecordDispatcher<S> {
    pub fn new(session: impl Into<String>, sinks: SinkPair<S>) -> Self {
        Self::with_metrics(session, sinks, Arc::new(DispatchMetrics::new()))
    }

    pub fn with_metrics(
        session: impl Into<String>,
        sinks: SinkPair<S>,
        metrics: Arc<DispatchMetrics>,
    ) -> Self {
        Self {
            session: session.into(),
            sinks,
            metrics,
        }
    }

    pub fn metrics(&self) -> Arc<DispatchMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Dispatch one record.
    ///
    /// An `Err` means this record's bytes were lost; the caller continues
    /// with the next record either way.
    pub async fn dispatch(&self, record: &LogRecord) -> Result<(), DispatchError> {
        let Some(tag) = ChannelTag::from_source(&record.source) else {
            self.metrics.inc_dropped();
            counter!("logdemux_records_dropped_total").increment(1);
            warn!(
                session = %self.session,
                tag = %record.source,
                partial = record.partial,
                time_nano = record.time_nano,
                "unknown channel tag, record dropped"
            );
            return Err(DispatchError::UnknownChannel {
                session: self.session.clone(),
                tag: record.source.clone(),
            });
        };

        match self.sinks.write_to(tag, &record.line).await {
            Ok(()) => {
                self.metrics.inc_dispatched(tag);
                counter!("logdemux_records_total", "channel" => tag.as_str()).increment(1);
                Ok(())
            }
            Err(e) => {
                self.metrics.inc_write_failure();
                counter!("logdemux_sink_write_failures_total", "channel" => tag.as_str())
                    .increment(1);
                error!(
                    session = %self.session,
                    channel = %tag,
                    error = %e,
                    "sink write failed, record lost"
                );
                Err(e.into())
            }
        }
    }
}
