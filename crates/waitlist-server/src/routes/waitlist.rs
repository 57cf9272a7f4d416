//! Waitlist JSON API: `/v1/waitlist`
//!
//! - `POST /v1/waitlist` — submit a signup, responds `new` or `duplicate`
//! - `GET  /v1/waitlist/health` — liveness plus stored lead count

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::DateTime;
use serde::{Deserialize, Serialize};

use waitlist_core::validator::{SessionContext, Submission};

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/v1/waitlist` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(signup))
        .route("/health", get(health))
}

// ── Request/response types ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub business_type: String,
    #[serde(default)]
    pub borough: String,
    #[serde(default)]
    pub alcohol: String,
    #[serde(default)]
    pub outdoor_seating: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub launch_timeframe: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub consent: bool,
    /// Hidden anti-bot field; humans leave it empty.
    #[serde(default)]
    pub honeypot: String,
    /// Unix seconds when the caller first rendered the form.
    pub rendered_epoch: i64,
    #[serde(default)]
    pub source_page: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    /// `new` or `duplicate`.
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub leads: usize,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// Submit one waitlist signup.
async fn signup(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, AppError> {
    let rendered_at = DateTime::from_timestamp(body.rendered_epoch, 0)
        .ok_or_else(|| AppError::BadRequest("invalid rendered_epoch".to_owned()))?;

    let source_page = if body.source_page.is_empty() {
        "api".to_owned()
    } else {
        body.source_page
    };
    let session = SessionContext {
        rendered_at,
        source_page,
    };

    let submission = Submission {
        full_name: body.full_name,
        email: body.email,
        phone: body.phone,
        business_type: body.business_type,
        borough: body.borough,
        alcohol: body.alcohol,
        outdoor_seating: body.outdoor_seating,
        role: body.role,
        launch_timeframe: body.launch_timeframe,
        notes: body.notes,
        consent: body.consent,
        honeypot: body.honeypot,
    };

    let outcome = state.intake.handle(submission, &session).await?;

    Ok(Json(SignupResponse {
        status: outcome.as_str(),
    }))
}

/// Liveness check with the current stored lead count.
async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, AppError> {
    let leads = state.store.load().await?.len();
    Ok(Json(HealthResponse {
        status: "ok",
        leads,
    }))
}
