//! Input stream abstraction.
//!
//! The host hands the registry a stream *name*; how that name becomes
//! readable bytes is deployment-specific. The reference deployment uses a
//! Unix FIFO whose path doubles as the session identifier.

use std::io;
use std::pin::Pin;

use tokio::io::AsyncRead;

/// Boxed readable byte stream for one session.
pub type ByteStream = Pin<Box<dyn AsyncRead + Send>>;

/// Opens a readable byte stream given its name.
///
/// Implementations must tolerate concurrent `open` calls; the registry
/// shares one factory across all `start` invocations.
#[trait_variant::make(StreamFactory: Send)]
pub trait LocalStreamFactory {
    async fn open(&self, name: &str) -> io::Result<ByteStream>;
}

/// Opens Unix FIFOs in non-blocking read mode.
///
/// Opening read-only does not wait for a writer; the session loop simply
/// blocks on the first frame instead.
#[cfg(unix)]
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoStreamFactory;

#[cfg(unix)]
impl StreamFactory for FifoStreamFactory {
    async fn open(&self, name: &str) -> io::Result<ByteStream> {
        let receiver = tokio::net::unix::pipe::OpenOptions::new().open_receiver(name)?;
        Ok(Box::pin(receiver))
    }
}
