//! Dispatch metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

use contracts::ChannelTag;

/// Per-session dispatch counters.
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Records written to the stdout sink
    stdout_records: AtomicU64,
    /// Records written to the stderr sink
    stderr_records: AtomicU64,
    /// Records dropped for an unknown channel tag
    dropped_records: AtomicU64,
    /// Records lost to sink write failures
    write_failures: AtomicU64,
}

impl DispatchMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the dispatched count for one channel
    pub fn inc_dispatched(&self, tag: ChannelTag) {
        match tag {
            ChannelTag::Stdout => self.stdout_records.fetch_add(1, Ordering::Relaxed),
            ChannelTag::Stderr => self.stderr_records.fetch_add(1, Ordering::Relaxed),
        };
    }

    /// Increment the dropped count
    pub fn inc_dropped(&self) {
        self.dropped_records.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the write failure count
    pub fn inc_write_failure(&self) {
        self.write_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total records dispatched across both channels
    pub fn dispatched_count(&self) -> u64 {
        self.stdout_records.load(Ordering::Relaxed) + self.stderr_records.load(Ordering::Relaxed)
    }

    /// Get dropped count
    pub fn dropped_count(&self) -> u64 {
        self.dropped_records.load(Ordering::Relaxed)
    }

    /// Get write failure count
    pub fn write_failure_count(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            stdout_records: self.stdout_records.load(Ordering::Relaxed),
            stderr_records: self.stderr_records.load(Ordering::Relaxed),
            dropped_records: self.dropped_records.load(Ordering::Relaxed),
            write_failures: self.write_failures.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of dispatch metrics (for reporting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub stdout_records: u64,
    pub stderr_records: u64,
    pub dropped_records: u64,
    pub write_failures: u64,
}
