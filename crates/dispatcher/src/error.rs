//! Dispatcher error types

use contracts::ContractError;
use thiserror::Error;

/// Per-record dispatch faults.
///
/// Neither variant is fatal to the session: the record is lost, an
/// observability event is emitted, and the loop moves to the next record.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The record carried a channel tag outside the two recognized values.
    #[error("unknown channel tag '{tag}' for session '{session}'")]
    UnknownChannel { session: String, tag: String },

    /// The matching sink rejected the write.
    #[error(transparent)]
    Sink(#[from] ContractError),
}
