//! NYC Navigator waitlist HTTP server.
//!
//! Wires the intake pipeline, lead store, and notification sinks into a
//! running Axum server. Serves the JSON API at `/v1/*` and the
//! server-rendered Landing and About pages at `/`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
