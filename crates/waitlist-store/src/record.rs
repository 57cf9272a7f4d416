//! The lead record model.
//!
//! A [`NewLead`] is what the intake pipeline hands to a store; a
//! [`LeadRecord`] is what the store persists, with `created_utc` stamped at
//! write time. Field order here is the on-disk CSV column order — keep the
//! two structs and [`CSV_HEADER`] in sync.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// CSV header row, matching [`LeadRecord`] field order.
pub const CSV_HEADER: [&str; 12] = [
    "full_name",
    "email",
    "phone",
    "business_type",
    "borough",
    "alcohol",
    "outdoor_seating",
    "role",
    "launch_timeframe",
    "notes",
    "source_page",
    "created_utc",
];

/// A validated signup that has not yet been persisted.
///
/// All descriptive fields are free-form strings; form variants that do not
/// collect a field leave it empty. The email is canonicalized by the store,
/// so callers may pass it in any letter case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewLead {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub business_type: String,
    pub borough: String,
    pub alcohol: String,
    pub outdoor_seating: String,
    pub role: String,
    pub launch_timeframe: String,
    pub notes: String,
    /// Which entry surface produced this lead (informational).
    pub source_page: String,
}

impl NewLead {
    /// Convert into a persistable record, canonicalizing the email and
    /// stamping the creation time.
    #[must_use]
    pub fn into_record(self, created_utc: DateTime<Utc>) -> LeadRecord {
        LeadRecord {
            email: canonical_email(&self.email),
            full_name: self.full_name,
            phone: self.phone,
            business_type: self.business_type,
            borough: self.borough,
            alcohol: self.alcohol,
            outdoor_seating: self.outdoor_seating,
            role: self.role,
            launch_timeframe: self.launch_timeframe,
            notes: self.notes,
            source_page: self.source_page,
            created_utc,
        }
    }
}

/// One stored waitlist signup. Serializes to one CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub full_name: String,
    /// Canonical (lowercase) email — the dedup key.
    pub email: String,
    pub phone: String,
    pub business_type: String,
    pub borough: String,
    pub alcohol: String,
    pub outdoor_seating: String,
    pub role: String,
    pub launch_timeframe: String,
    pub notes: String,
    pub source_page: String,
    /// Assigned by the store at write time.
    pub created_utc: DateTime<Utc>,
}

/// Canonicalize an email address into the natural dedup key.
///
/// Trims surrounding whitespace and lowercases. The domain part of an email
/// is case-insensitive per RFC and in practice the local part is too, so the
/// dedup key is the lowercased whole address.
#[must_use]
pub fn canonical_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}
