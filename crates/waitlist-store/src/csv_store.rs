//! CSV-file lead store.
//!
//! One CSV row per lead with a fixed header row. The file is opened in
//! append-only mode — a signup writes exactly one new row, never rewriting
//! the file. Dedup is served from an in-memory email index rebuilt from disk
//! when the store is opened.
//!
//! # Thread safety
//!
//! A `tokio::sync::Mutex` guards both the email index and the file handle,
//! so the membership check and the append are one critical section. Writes
//! are infrequent and the critical section is tiny (one `write_all`).

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

use crate::record::{CSV_HEADER, LeadRecord, NewLead, canonical_email};
use crate::{AppendOutcome, LeadStore, StoreError};

/// Lead store backed by a CSV file.
pub struct CsvStore {
    /// Path to the CSV file.
    path: PathBuf,
    /// Email index plus serialized write access to the file.
    inner: Mutex<Inner>,
}

struct Inner {
    /// Canonical emails already on disk.
    emails: HashSet<String>,
    /// Lazily opened append handle.
    writer: Option<tokio::fs::File>,
}

impl CsvStore {
    /// Open a store at the given path, rebuilding the email index from any
    /// existing file.
    ///
    /// A missing file means an empty store. An unreadable or damaged file is
    /// logged and treated as empty — the store never refuses to start over
    /// it, it just loses dedup knowledge of the unreadable rows.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let emails = match std::fs::read(&path) {
            Ok(bytes) => index_emails(&bytes, &path),
            Err(e) if e.kind() == ErrorKind::NotFound => HashSet::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "store unreadable, starting with empty index");
                HashSet::new()
            }
        };

        Self {
            path,
            inner: Mutex::new(Inner {
                emails,
                writer: None,
            }),
        }
    }

    /// Open or reuse the append handle, writing the header row if the file
    /// is brand new.
    async fn ensure_writer(&self, inner: &mut Inner) -> Result<(), StoreError> {
        if inner.writer.is_some() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| StoreError::Open {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        let len = file
            .metadata()
            .await
            .map_err(|e| StoreError::Open {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?
            .len();

        let mut file = file;
        if len == 0 {
            let header = header_row()?;
            file.write_all(&header).await.map_err(|e| StoreError::Write {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        inner.writer = Some(file);
        Ok(())
    }
}

#[async_trait::async_trait]
impl LeadStore for CsvStore {
    async fn load(&self) -> Result<Vec<LeadRecord>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.display().to_string(),
                    reason: e.to_string(),
                });
            }
        };

        let mut rdr = csv::Reader::from_reader(bytes.as_slice());
        let mut records = Vec::new();
        for row in rdr.deserialize::<LeadRecord>() {
            match row {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "skipping unparseable row");
                }
            }
        }
        Ok(records)
    }

    async fn append_if_new(&self, lead: NewLead) -> Result<AppendOutcome, StoreError> {
        let key = canonical_email(&lead.email);
        let mut inner = self.inner.lock().await;

        if inner.emails.contains(&key) {
            return Ok(AppendOutcome::Duplicate);
        }

        let record = lead.into_record(Utc::now());
        let row = serialize_row(&record)?;

        self.ensure_writer(&mut inner).await?;
        let file = inner.writer.as_mut().ok_or_else(|| StoreError::Write {
            path: self.path.display().to_string(),
            reason: "file handle unexpectedly None after open".to_owned(),
        })?;

        file.write_all(&row).await.map_err(|e| StoreError::Write {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        file.flush().await.map_err(|e| StoreError::Write {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        inner.emails.insert(key);
        Ok(AppendOutcome::New)
    }

    async fn contains(&self, email: &str) -> Result<bool, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.emails.contains(&canonical_email(email)))
    }
}

impl std::fmt::Debug for CsvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Build the email index from raw file bytes, skipping damaged rows.
fn index_emails(bytes: &[u8], path: &Path) -> HashSet<String> {
    let mut rdr = csv::Reader::from_reader(bytes);
    let mut emails = HashSet::new();
    for row in rdr.deserialize::<LeadRecord>() {
        match row {
            Ok(record) => {
                emails.insert(canonical_email(&record.email));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unparseable row while indexing");
            }
        }
    }
    emails
}

/// Serialize the header into one CSV line.
fn header_row() -> Result<Vec<u8>, StoreError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)
        .map_err(|e| StoreError::Serialize {
            reason: e.to_string(),
        })?;
    wtr.into_inner().map_err(|e| StoreError::Serialize {
        reason: e.to_string(),
    })
}

/// Serialize one record into one CSV line.
fn serialize_row(record: &LeadRecord) -> Result<Vec<u8>, StoreError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.serialize(record).map_err(|e| StoreError::Serialize {
        reason: e.to_string(),
    })?;
    wtr.into_inner().map_err(|e| StoreError::Serialize {
        reason: e.to_string(),
    })
}
