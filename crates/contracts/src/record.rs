//! Log record types.

use std::fmt;

use bytes::Bytes;

/// Which of the two output destinations a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelTag {
    /// Primary channel.
    Stdout,
    /// Secondary channel.
    Stderr,
}

impl ChannelTag {
    /// Parse the wire `source` field into a channel tag.
    ///
    /// Returns `None` for anything outside the two recognized values; the
    /// dispatcher treats that as a per-record route error, not a decode error.
    pub fn from_source(source: &str) -> Option<Self> {
        match source {
            "stdout" => Some(Self::Stdout),
            "stderr" => Some(Self::Stderr),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

impl fmt::Display for ChannelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded log record.
///
/// Records are transient: decoded, dispatched, discarded. Only `line` and
/// `source` affect routing; `partial` and `time_nano` are informational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Raw payload bytes. May contain embedded newlines.
    pub line: Bytes,
    /// Channel tag exactly as received on the wire.
    pub source: String,
    /// Whether this record is a partial line continued by a later record.
    pub partial: bool,
    /// Nanoseconds since the Unix epoch.
    pub time_nano: i64,
}
