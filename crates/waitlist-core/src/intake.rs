//! Intake orchestration: validate → persist → notify.
//!
//! The handler walks one submission through the whole pipeline. A rejected
//! submission touches nothing. A validated one is appended to the store
//! (idempotent on email) and then handed to the notifier on every
//! validated submission, duplicates included, with the resubmitted data.
//! That last point is deliberate and pinned by tests.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use waitlist_store::{AppendOutcome, LeadStore, NewLead};

use crate::error::IntakeError;
use crate::sink::Notifier;
use crate::validator::{self, SessionContext, Submission};

/// User-visible result of a validated submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    /// First-time signup — a record was stored.
    New,
    /// This email was already registered; nothing new was stored.
    Duplicate,
}

impl SignupOutcome {
    /// Wire representation for the JSON API.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Duplicate => "duplicate",
        }
    }
}

/// Orchestrates the signup pipeline over a store and a sink set.
pub struct IntakeHandler {
    store: Arc<dyn LeadStore>,
    notifier: Arc<Notifier>,
    min_form_seconds: i64,
}

impl IntakeHandler {
    /// Build a handler with the default anti-bot timing threshold.
    #[must_use]
    pub fn new(store: Arc<dyn LeadStore>, notifier: Arc<Notifier>) -> Self {
        Self::with_min_form_seconds(store, notifier, validator::DEFAULT_MIN_FORM_SECONDS)
    }

    /// Build a handler with an explicit timing threshold (seconds).
    #[must_use]
    pub fn with_min_form_seconds(
        store: Arc<dyn LeadStore>,
        notifier: Arc<Notifier>,
        min_form_seconds: i64,
    ) -> Self {
        Self {
            store,
            notifier,
            min_form_seconds,
        }
    }

    /// Handle one submission end to end.
    ///
    /// Notifications are dispatched on a detached task, so sink latency or
    /// failure never delays or changes the returned outcome.
    ///
    /// # Errors
    ///
    /// - [`IntakeError::Rejected`] with every violated rule; the store and
    ///   sinks were not touched.
    /// - [`IntakeError::Store`] if persistence itself failed.
    pub async fn handle(
        &self,
        submission: Submission,
        session: &SessionContext,
    ) -> Result<SignupOutcome, IntakeError> {
        validator::validate(&submission, session, Utc::now(), self.min_form_seconds)
            .map_err(IntakeError::Rejected)?;

        let lead = NewLead {
            full_name: submission.full_name.trim().to_owned(),
            email: submission.email.trim().to_owned(),
            phone: submission.phone,
            business_type: submission.business_type,
            borough: submission.borough,
            alcohol: submission.alcohol,
            outdoor_seating: submission.outdoor_seating,
            role: submission.role,
            launch_timeframe: submission.launch_timeframe,
            notes: submission.notes,
            source_page: session.source_page.clone(),
        };

        let outcome = match self.store.append_if_new(lead.clone()).await? {
            AppendOutcome::New => SignupOutcome::New,
            AppendOutcome::Duplicate => SignupOutcome::Duplicate,
        };

        info!(
            email = %waitlist_store::canonical_email(&lead.email),
            source = %session.source_page,
            outcome = outcome.as_str(),
            "signup processed"
        );

        // Sinks see the resubmitted data even for duplicates, stamped with
        // the submission time rather than the original record's. Detached
        // so sink latency never delays the user-visible outcome.
        let notifier = Arc::clone(&self.notifier);
        let record = lead.into_record(Utc::now());
        tokio::spawn(async move {
            notifier.notify(&record).await;
        });

        Ok(outcome)
    }
}

impl std::fmt::Debug for IntakeHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntakeHandler")
            .field("min_form_seconds", &self.min_form_seconds)
            .finish_non_exhaustive()
    }
}
