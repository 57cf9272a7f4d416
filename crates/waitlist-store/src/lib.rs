//! Lead storage for the NYC Navigator waitlist.
//!
//! This crate defines the [`LeadStore`] trait — a deduplicated, append-only
//! store of waitlist signups keyed by lowercase email. It knows nothing about
//! validation, HTTP, or notification fan-out; those live in `waitlist-core`.
//!
//! Two implementations are provided:
//!
//! - [`CsvStore`] — production default, one CSV row per lead with a fixed
//!   header, appends serialized behind a mutex
//! - [`MemoryStore`] — in-memory, for testing only

mod csv_store;
mod error;
mod memory;
mod record;

pub use csv_store::CsvStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use record::{LeadRecord, NewLead, canonical_email, CSV_HEADER};

/// Outcome of an [`LeadStore::append_if_new`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// First signup for this email — a record was written.
    New,
    /// The email was already present — nothing was written.
    Duplicate,
}

/// A deduplicated, append-only store of lead records.
///
/// The natural key is the canonicalized (trimmed, lowercased) email address.
/// There is no update or delete operation: a record is written at most once
/// per distinct email, and later submissions for the same email are reported
/// as [`AppendOutcome::Duplicate`] without touching the store.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait LeadStore: Send + Sync + 'static {
    /// Load the full set of stored records.
    ///
    /// A missing backing file yields an empty set. Rows that fail to parse
    /// are skipped (and logged), never fatal.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the backing store cannot be read at
    /// all (permission errors and the like — not absence, not row damage).
    async fn load(&self) -> Result<Vec<LeadRecord>, StoreError>;

    /// Append a lead unless its email is already present.
    ///
    /// Canonicalizes the email, stamps `created_utc` at write time, and
    /// writes exactly one row. Returns [`AppendOutcome::Duplicate`] without
    /// writing when the key already exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the row cannot be persisted.
    async fn append_if_new(&self, lead: NewLead) -> Result<AppendOutcome, StoreError>;

    /// Check whether an email (any letter case) is already registered.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the membership index is unavailable.
    async fn contains(&self, email: &str) -> Result<bool, StoreError>;
}
