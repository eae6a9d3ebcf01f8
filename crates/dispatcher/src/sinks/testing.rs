//! In-memory sink for unit tests.

use std::sync::{Arc, Mutex};

use contracts::{ContractError, RecordSink};

/// Sink that appends writes to a shared in-memory buffer.
pub struct VecSink {
    name: String,
    buffer: Arc<Mutex<Vec<u8>>>,
    fail_writes: bool,
}

impl VecSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffer: Arc::new(Mutex::new(Vec::new())),
            fail_writes: false,
        }
    }

    /// Sink whose every write fails.
    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            fail_writes: true,
            ..Self::new(name)
        }
    }

    pub fn buffer(&self) -> Arc<Mutex<Vec<u8>>> {
        Arc::clone(&self.buffer)
    }
}

impl RecordSink for VecSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn write(&mut self, payload: &[u8]) -> Result<(), ContractError> {
        if self.fail_writes {
            return Err(ContractError::sink_write(&self.name, "scripted failure"));
        }
        self.buffer.lock().unwrap().extend_from_slice(payload);
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), ContractError> {
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ContractError> {
        Ok(())
    }
}
