//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace:
//! record and channel types, per-session configuration, and the sink trait.
//! Business crates depend only on this crate, never on each other's internals.
//!
//! ## Time Model
//! - Record timestamps are signed nanoseconds since the Unix epoch, carried
//!   verbatim from the wire; nothing in this workspace interprets them.

mod config;
mod error;
mod record;
mod sink;

pub use config::{SessionConfig, OPT_STDERR, OPT_STDOUT};
pub use error::{ConfigError, ContractError};
pub use record::{ChannelTag, LogRecord};
pub use sink::{LocalRecordSink, RecordSink};
