//! Wire schema for one encoded record.
//!
//! The field layout matches the Docker log-driver `LogEntry` message, so
//! streams produced by the reference deployment decode unchanged. Unknown
//! trailing fields are skipped by prost.

use contracts::LogRecord;
use prost::Message;

/// Protobuf body of one frame.
#[derive(Clone, PartialEq, Message)]
pub struct LogEntry {
    /// Channel tag (`"stdout"` / `"stderr"` in the reference semantics).
    #[prost(string, tag = "1")]
    pub source: String,
    /// Nanoseconds since the Unix epoch.
    #[prost(int64, tag = "2")]
    pub time_nano: i64,
    /// Raw payload bytes.
    #[prost(bytes = "vec", tag = "3")]
    pub line: Vec<u8>,
    /// Continuation flag.
    #[prost(bool, tag = "4")]
    pub partial: bool,
}

impl From<&LogRecord> for LogEntry {
    fn from(record: &LogRecord) -> Self {
        Self {
            source: record.source.clone(),
            time_nano: record.time_nano,
            line: record.line.to_vec(),
            partial: record.partial,
        }
    }
}

/// Encode one entry as a length-prefixed frame.
///
/// The sidecar itself only decodes; this is for tests and for tools that
/// produce a stream to feed it.
pub fn encode_frame(entry: &LogEntry) -> Vec<u8> {
    let body = entry.encode_to_vec();
    let mut frame = Vec::with_capacity(4 + body.len());
    frame.extend_from_slice(&(body.len() as u32).to_be_bytes());
    frame.extend_from_slice(&body);
    frame
}
