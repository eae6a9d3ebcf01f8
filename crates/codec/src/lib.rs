//! # Codec
//!
//! Framed-message decoding for the log stream.
//!
//! Responsibilities:
//! - Decode `[4-byte big-endian length][protobuf body]` frames into
//!   [`contracts::LogRecord`]s
//! - Classify decode faults so the session loop can resynchronize
//! - Encode frames for tests and stream-producing tools

mod decoder;
mod error;
mod wire;

pub use decoder::{FrameDecoder, MAX_FRAME_BYTES};
pub use error::FrameError;
pub use wire::{encode_frame, LogEntry};
