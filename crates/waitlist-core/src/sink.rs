//! Notification sink trait and best-effort fan-out.
//!
//! A sink is an optional external system told about each validated signup.
//! Delivery is fire-and-forget: a sink failure is logged with the sink's
//! name and otherwise ignored. Sink outcomes never influence the
//! new/duplicate result the submitter sees — that policy lives here, in
//! [`Notifier::notify`], not scattered across call sites.

use std::sync::Arc;

use tracing::{debug, warn};

use waitlist_store::LeadRecord;

use crate::error::SinkError;

/// An external system notified of signups.
///
/// Implementations must be safe to share across async tasks.
#[async_trait::async_trait]
pub trait NotificationSink: Send + Sync + 'static {
    /// The sink's name (for logging).
    fn name(&self) -> &str;

    /// Deliver one record.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] describing the failed step. The caller
    /// decides whether that matters; the [`Notifier`] decides it does not.
    async fn deliver(&self, record: &LeadRecord) -> Result<(), SinkError>;
}

/// Fans a record out to every configured sink, best-effort.
///
/// The sink set is fixed at startup from configuration — there is no
/// runtime probing for optional integrations.
pub struct Notifier {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl Notifier {
    /// Create a notifier over a fixed set of sinks. An empty set is valid
    /// and makes [`Notifier::notify`] a no-op.
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn NotificationSink>>) -> Self {
        Self { sinks }
    }

    /// Number of configured sinks.
    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Deliver the record to every sink.
    ///
    /// Never fails: each sink error is logged at `warn` and swallowed.
    /// Sinks run sequentially; each carries its own bounded timeout, so the
    /// total is bounded too.
    pub async fn notify(&self, record: &LeadRecord) {
        for sink in &self.sinks {
            match sink.deliver(record).await {
                Ok(()) => {
                    debug!(sink = sink.name(), email = %record.email, "sink delivery ok");
                }
                Err(e) => {
                    warn!(sink = sink.name(), error = %e, "sink delivery failed, ignoring");
                }
            }
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
