//! Error types for `waitlist-core`.

use waitlist_store::StoreError;

use crate::validator::Violation;

/// Errors from a single notification sink delivery.
///
/// Sink errors never reach the submitter: the [`crate::sink::Notifier`]
/// logs them and moves on. They exist as values so that policy is an
/// explicit decision in one place rather than scattered ignore sites.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The outbound HTTP request failed (connect, DNS, timeout).
    #[error("request failed: {reason}")]
    Request { reason: String },

    /// The remote service answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Service-account credentials were missing or malformed.
    #[error("credentials error: {reason}")]
    Credentials { reason: String },

    /// Token exchange with the auth server failed.
    #[error("auth failed: {reason}")]
    Auth { reason: String },

    /// The payload could not be serialized.
    #[error("serialization failed: {reason}")]
    Serialize { reason: String },
}

/// Errors from the intake handler.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// The submission failed validation. Carries every violated rule, in
    /// reporting order. Nothing was persisted and no sink fired.
    #[error("submission rejected ({} violation(s))", .0.len())]
    Rejected(Vec<Violation>),

    /// The lead store failed — the only fatal path in normal operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}
