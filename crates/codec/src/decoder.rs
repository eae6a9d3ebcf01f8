//! FrameDecoder - lazy record sequence over a byte stream

use bytes::Bytes;
use contracts::LogRecord;
use prost::Message;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::FrameError;
use crate::wire::LogEntry;

/// Largest accepted frame body, in bytes.
pub const MAX_FRAME_BYTES: usize = 1_000_000;

/// Decodes length-prefixed records from a readable byte stream.
///
/// The sequence is lazy and restartable: after any `Err` the caller may
/// [`reset`](Self::reset) and call [`next`](Self::next) again, which resumes
/// at the stream's current read position. That resynchronization is
/// best-effort; it assumes the remaining stream still begins at a frame
/// boundary.
pub struct FrameDecoder<R> {
    reader: R,
    body: Vec<u8>,
}

impl<R: AsyncRead + Unpin> FrameDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            body: Vec::new(),
        }
    }

    /// Decode the next frame.
    ///
    /// `Ok(None)` is clean end-of-stream, the sole terminal signal. Every
    /// `Err` leaves the stream open and is recoverable via [`reset`](Self::reset).
    pub async fn next(&mut self) -> Result<Option<LogRecord>, FrameError> {
        let len = match self.read_length_prefix().await? {
            Some(len) => len,
            None => return Ok(None),
        };

        if len > MAX_FRAME_BYTES {
            return Err(FrameError::Oversized {
                len,
                max: MAX_FRAME_BYTES,
            });
        }

        self.body.resize(len, 0);
        self.reader
            .read_exact(&mut self.body)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::UnexpectedEof => FrameError::Truncated { wanted: len },
                _ => FrameError::Io(e),
            })?;

        let entry = LogEntry::decode(self.body.as_slice())?;
        Ok(Some(LogRecord {
            line: Bytes::from(entry.line),
            source: entry.source,
            partial: entry.partial,
            time_nano: entry.time_nano,
        }))
    }

    /// Discard partially buffered frame state after a decode error.
    pub fn reset(&mut self) {
        self.body.clear();
    }

    /// Read the 4-byte big-endian length prefix.
    ///
    /// `Ok(None)` only when the stream ends exactly on a frame boundary;
    /// EOF partway through the prefix is truncation.
    async fn read_length_prefix(&mut self) -> Result<Option<usize>, FrameError> {
        let mut prefix = [0u8; 4];
        let mut filled = 0;
        while filled < prefix.len() {
            let n = self.reader.read(&mut prefix[filled..]).await?;
            if n == 0 {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(FrameError::Truncated {
                    wanted: prefix.len() - filled,
                });
            }
            filled += n;
        }
        Ok(Some(u32::from_be_bytes(prefix) as usize))
    }
}
