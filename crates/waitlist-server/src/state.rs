//! Shared application state.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`.

use std::sync::Arc;

use waitlist_core::intake::IntakeHandler;
use waitlist_store::LeadStore;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// The intake pipeline (validate → persist → notify).
    pub intake: IntakeHandler,
    /// Direct store access for the health endpoint.
    pub store: Arc<dyn LeadStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
