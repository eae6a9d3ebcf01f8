//! Typed per-session configuration.
//!
//! The host supplies a flat map of named string options once at start time.
//! It is validated exhaustively here into a typed structure instead of being
//! consulted ad hoc later.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::ConfigError;

/// Option key naming the primary-channel sink destination.
pub const OPT_STDOUT: &str = "stdout";
/// Option key naming the secondary-channel sink destination.
pub const OPT_STDERR: &str = "stderr";

/// Immutable configuration for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Destination file for `stdout`-tagged payloads.
    pub stdout: PathBuf,
    /// Destination file for `stderr`-tagged payloads.
    pub stderr: PathBuf,
}

impl SessionConfig {
    /// Build from the host-supplied option map.
    ///
    /// Unrecognized options are ignored; both sink destinations are required.
    ///
    /// # Errors
    /// [`ConfigError::MissingOption`] if either required key is absent.
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Ok(Self {
            stdout: required(options, OPT_STDOUT)?,
            stderr: required(options, OPT_STDERR)?,
        })
    }
}

fn required(options: &HashMap<String, String>, key: &str) -> Result<PathBuf, ConfigError> {
    options
        .get(key)
        .map(PathBuf::from)
        .ok_or_else(|| ConfigError::MissingOption {
            key: key.to_string(),
        })
}
