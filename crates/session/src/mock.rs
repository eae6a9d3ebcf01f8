//! In-memory stream factory for tests and host-less development.

use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use tokio::io::DuplexStream;

use crate::stream::{ByteStream, StreamFactory};

/// Serves pre-registered in-memory streams by name.
///
/// Register the read half of a [`tokio::io::duplex`] pair under a session
/// identifier and keep the write half to feed it frames. Each name can be
/// opened once; opening an unregistered name fails like a missing FIFO.
#[derive(Default)]
pub struct MemoryStreamFactory {
    streams: Mutex<HashMap<String, DuplexStream>>,
}

impl MemoryStreamFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: impl Into<String>, stream: DuplexStream) {
        self.streams
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.into(), stream);
    }
}

impl StreamFactory for MemoryStreamFactory {
    async fn open(&self, name: &str) -> io::Result<ByteStream> {
        self.streams
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(name)
            .map(|s| Box::pin(s) as ByteStream)
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no stream named '{name}'"))
            })
    }
}
