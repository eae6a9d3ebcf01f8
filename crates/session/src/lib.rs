//! # Session
//!
//! Session lifecycle for the demultiplexer.
//!
//! Responsibilities:
//! - Run one decode-and-dispatch loop per input stream
//! - Track live sessions in a registry keyed by identifier
//! - Provide the `start`/`stop` surface exposed to the host
//! - Abstract how a stream name becomes readable bytes (`StreamFactory`)

mod error;
mod mock;
mod registry;
mod session;
mod stream;

pub use error::StartError;
pub use mock::MemoryStreamFactory;
pub use registry::{SessionHandle, SessionRegistry};
pub use session::{SessionState, MAX_CONSECUTIVE_DECODE_ERRORS};
pub use stream::{ByteStream, LocalStreamFactory, StreamFactory};

#[cfg(unix)]
pub use stream::FifoStreamFactory;
