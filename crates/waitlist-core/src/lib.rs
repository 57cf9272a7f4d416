//! Core library for the NYC Navigator waitlist.
//!
//! The intake pipeline: a pure [`validator`] over submitted form values, the
//! [`intake::IntakeHandler`] orchestrating validate → persist → notify, and
//! best-effort [`sink`]s (HTTP webhook, Google Sheets) fanned out behind a
//! [`sink::Notifier`]. Persistence itself lives in `waitlist-store`.

pub mod error;
pub mod intake;
pub mod sheets;
pub mod sink;
pub mod validator;
pub mod webhook;
