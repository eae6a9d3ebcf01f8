//! Registry error types

use std::path::PathBuf;

use thiserror::Error;

/// Startup errors, surfaced synchronously to the caller of `start`.
///
/// After any of these the session is never registered: no entry, no running
/// loop, and any sink already opened on the way is closed again.
#[derive(Debug, Error)]
pub enum StartError {
    /// A session with this identifier is already live.
    #[error("logging already configured for '{id}'")]
    AlreadyActive { id: String },

    /// A required sink destination was absent from the configuration.
    #[error("required option '{key}' missing from the session configuration")]
    MissingOption { key: String },

    /// A sink destination could not be created for writing.
    #[error("failed to open sink '{}': {source}", path.display())]
    SinkOpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input stream could not be opened.
    #[error("failed to open input stream '{name}': {source}")]
    StreamOpenFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
