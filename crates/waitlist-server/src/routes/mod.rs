//! HTTP route modules and router assembly.

pub mod pages;
pub mod waitlist;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    // CORS applies to the JSON API; the HTML pages don't care.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    // Bound concurrent signups: the store serializes writes anyway, so
    // there is no point queueing unbounded requests behind its mutex.
    let api = Router::new()
        .nest("/v1/waitlist", waitlist::router())
        .layer(tower::limit::ConcurrencyLimitLayer::new(32));

    Router::new()
        .merge(api)
        .merge(pages::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}
