//! Shared error definitions.
//!
//! Decode, dispatch, and registry errors live in their own crates; this
//! module holds only what crosses crate seams: sink errors (the `RecordSink`
//! contract) and configuration errors (the `SessionConfig` contract).

use thiserror::Error;

/// Unified error type for the sink contract.
#[derive(Debug, Error)]
pub enum ContractError {
    /// A write to a sink failed. Costs one record, never the session.
    #[error("sink '{sink}' write error: {message}")]
    SinkWrite { sink: String, message: String },

    /// A write was attempted through a pair whose sinks were already closed.
    #[error("sink for channel '{channel}' is closed")]
    SinkClosed { channel: String },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create sink write error
    pub fn sink_write(sink: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink: sink.into(),
            message: message.into(),
        }
    }
}

/// Session configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required option was absent from the start-time option map.
    #[error("required option '{key}' missing from the session configuration")]
    MissingOption { key: String },
}
