//! FileSink - appends record payloads to one destination file

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use contracts::{ContractError, RecordSink};
use tracing::{debug, error};

/// Sink that appends raw payload bytes to a file.
///
/// The destination is created (truncated) at open time, matching the
/// reference deployment; payloads are then appended in dispatch order with
/// no added framing or delimiters.
pub struct FileSink {
    name: String,
    path: PathBuf,
    file: File,
}

impl FileSink {
    /// Create the destination file for writing.
    pub fn create(name: impl Into<String>, path: &Path) -> std::io::Result<Self> {
        Ok(Self {
            name: name.into(),
            path: path.to_path_buf(),
            file: File::create(path)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn write(&mut self, payload: &[u8]) -> Result<(), ContractError> {
        self.file.write_all(payload).map_err(|e| {
            error!(sink = %self.name, path = %self.path.display(), error = %e, "write failed");
            ContractError::sink_write(&self.name, e.to_string())
        })
    }

    async fn flush(&mut self) -> Result<(), ContractError> {
        self.file
            .sync_all()
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))
    }

    async fn close(&mut self) -> Result<(), ContractError> {
        debug!(sink = %self.name, path = %self.path.display(), "FileSink closed");
        Ok(())
    }
}
