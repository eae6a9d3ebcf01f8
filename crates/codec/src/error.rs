//! Frame decode error types

use thiserror::Error;

/// Decode faults for a single frame.
///
/// Every variant is recoverable at the session level: the loop resets the
/// decoder and tries again from the stream's current position. Clean
/// end-of-stream is not an error; the decoder reports it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Length prefix exceeds the frame bound.
    #[error("frame length {len} exceeds maximum {max}")]
    Oversized { len: usize, max: usize },

    /// The stream ended inside a frame.
    #[error("stream ended mid-frame ({wanted} more bytes wanted)")]
    Truncated { wanted: usize },

    /// The frame body failed protobuf validation.
    #[error("malformed record body: {0}")]
    Malformed(#[from] prost::DecodeError),

    /// Transient read failure from the underlying stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
