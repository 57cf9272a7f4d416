//! Store error types.
//!
//! Every variant carries enough context to diagnose the problem without a
//! debugger — the path involved and the underlying reason.

/// Errors that can occur during lead store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to open or create the backing file.
    #[error("failed to open store at '{path}': {reason}")]
    Open { path: String, reason: String },

    /// Failed to read the backing file.
    #[error("failed to read store at '{path}': {reason}")]
    Read { path: String, reason: String },

    /// Failed to append a row to the backing file.
    #[error("failed to write store at '{path}': {reason}")]
    Write { path: String, reason: String },

    /// Failed to serialize a record into a CSV row.
    #[error("failed to serialize lead record: {reason}")]
    Serialize { reason: String },
}
