//! # Dispatcher
//!
//! Per-record routing to a session's two sinks.
//!
//! Responsibilities:
//! - Route each decoded record to the sink matching its channel tag
//! - Isolate per-record faults (unknown tag, failed write) from the session
//! - Hold the shared sink pair so the registry can close it while the run
//!   loop is still writing

pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod pair;
pub mod sinks;

pub use contracts::{ChannelTag, LogRecord, RecordSink};
pub use dispatcher::RecordDispatcher;
pub use error::DispatchError;
pub use metrics::{DispatchMetrics, MetricsSnapshot};
pub use pair::SinkPair;
pub use sinks::FileSink;
