//! In-memory lead store for testing.
//!
//! Stores records in a `Vec` behind a `RwLock`. Not persistent — all data is
//! lost when the process exits. Use this for unit and integration tests that
//! need a real store without touching disk.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::record::{LeadRecord, NewLead, canonical_email};
use crate::{AppendOutcome, LeadStore, StoreError};

/// An in-memory lead store.
///
/// Thread-safe and async-compatible. Cloning shares the underlying data.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<LeadRecord>,
    emails: HashSet<String>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LeadStore for MemoryStore {
    async fn load(&self) -> Result<Vec<LeadRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.records.clone())
    }

    async fn append_if_new(&self, lead: NewLead) -> Result<AppendOutcome, StoreError> {
        let key = canonical_email(&lead.email);
        let mut inner = self.inner.write().await;

        if inner.emails.contains(&key) {
            return Ok(AppendOutcome::Duplicate);
        }

        inner.records.push(lead.into_record(Utc::now()));
        inner.emails.insert(key);
        Ok(AppendOutcome::New)
    }

    async fn contains(&self, email: &str) -> Result<bool, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.emails.contains(&canonical_email(email)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(email: &str) -> NewLead {
        NewLead {
            full_name: "Jane Doe".to_owned(),
            email: email.to_owned(),
            ..NewLead::default()
        }
    }

    #[tokio::test]
    async fn empty_store_loads_nothing() {
        let store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_empty());
        assert!(!store.contains("jane@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn append_then_duplicate() {
        let store = MemoryStore::new();
        assert_eq!(
            store.append_if_new(lead("jane@example.com")).await.unwrap(),
            AppendOutcome::New
        );
        assert_eq!(
            store.append_if_new(lead("Jane@Example.COM")).await.unwrap(),
            AppendOutcome::Duplicate
        );
        assert_eq!(store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clone_shares_state() {
        let store = MemoryStore::new();
        let clone = store.clone();
        store.append_if_new(lead("jane@example.com")).await.unwrap();
        assert!(clone.contains("jane@example.com").await.unwrap());
    }
}
