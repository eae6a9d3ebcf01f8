//! RecordSink trait - dispatcher output interface
//!
//! Defines the abstract interface for the two per-session output sinks.

use crate::ContractError;

/// Append-only byte destination for one channel.
///
/// All sink implementations must implement this trait.
#[trait_variant::make(RecordSink: Send)]
pub trait LocalRecordSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Append one record's payload bytes, exactly as received.
    ///
    /// # Errors
    /// Returns write error (should include context)
    async fn write(&mut self, payload: &[u8]) -> Result<(), ContractError>;

    /// Flush buffered bytes (if any)
    async fn flush(&mut self) -> Result<(), ContractError>;

    /// Close sink
    async fn close(&mut self) -> Result<(), ContractError>;
}
