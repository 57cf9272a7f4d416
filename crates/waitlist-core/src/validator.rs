//! Submission validation.
//!
//! A pure function over the submitted field values plus the request-scoped
//! session context. Every rule is evaluated — no short-circuiting — and the
//! violations come back in a fixed reporting order, so the submitter sees
//! the full list at once.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;

/// Minimum seconds between first render and submit before a submission is
/// considered human.
pub const DEFAULT_MIN_FORM_SECONDS: i64 = 3;

/// `local@domain.tld`, case-insensitive. Deliberately the permissive
/// landing-page pattern, not a full RFC 5322 parser.
#[allow(clippy::expect_used)] // pattern is a compile-time constant
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern is valid")
});

/// Raw field values from one signup form submission.
///
/// Descriptive fields a form variant does not collect stay empty. The
/// honeypot is a field hidden from humans; anything in it means a bot.
#[derive(Debug, Clone, Default)]
pub struct Submission {
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
    /// Consent-to-contact checkbox.
    pub consent: bool,
    /// Hidden anti-bot field. Must be empty.
    pub honeypot: String,
}

/// Request-scoped context the caller holds for one page view.
///
/// Explicit state, passed in — the render timestamp is not ambient session
/// data.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// When the form was first rendered to this visitor.
    pub rendered_at: DateTime<Utc>,
    /// Which entry surface the submission came from (informational).
    pub source_page: String,
}

/// A violated validation rule.
///
/// Variant order is reporting order. `Display` gives the user-facing
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// `full_name` empty after trimming.
    NameRequired,
    /// Email does not match the required pattern.
    InvalidEmail,
    /// Consent checkbox not set.
    ConsentRequired,
    /// Honeypot field non-empty — automated submission.
    SpamDetected,
    /// Submitted faster than the minimum threshold — automated submission.
    TooFast,
}

impl Violation {
    /// Stable machine-readable identifier for API responses.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::NameRequired => "name_required",
            Self::InvalidEmail => "invalid_email",
            Self::ConsentRequired => "consent_required",
            Self::SpamDetected => "spam_detected",
            Self::TooFast => "too_fast",
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::NameRequired => "Name required",
            Self::InvalidEmail => "Invalid email",
            Self::ConsentRequired => "Consent required",
            Self::SpamDetected => "Spam detected",
            Self::TooFast => "Too quick; try again",
        };
        f.write_str(msg)
    }
}

/// Check whether an email matches the accepted pattern.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validate one submission against all rules.
///
/// Pure over its inputs: the caller supplies `now` so the timing rule is
/// testable without a clock.
///
/// # Errors
///
/// Returns the non-empty list of violated rules, in reporting order.
pub fn validate(
    submission: &Submission,
    session: &SessionContext,
    now: DateTime<Utc>,
    min_form_seconds: i64,
) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    if submission.full_name.trim().is_empty() {
        violations.push(Violation::NameRequired);
    }
    if !valid_email(submission.email.trim()) {
        violations.push(Violation::InvalidEmail);
    }
    if !submission.consent {
        violations.push(Violation::ConsentRequired);
    }
    if !submission.honeypot.is_empty() {
        violations.push(Violation::SpamDetected);
    }
    if now.signed_duration_since(session.rendered_at) < Duration::seconds(min_form_seconds) {
        violations.push(Violation::TooFast);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_submission() -> Submission {
        Submission {
            full_name: "Jane Doe".to_owned(),
            email: "jane@example.com".to_owned(),
            business_type: "Restaurant".to_owned(),
            borough: "Brooklyn".to_owned(),
            consent: true,
            ..Submission::default()
        }
    }

    fn session_rendered_secs_ago(secs: i64) -> (SessionContext, DateTime<Utc>) {
        let now = Utc::now();
        let session = SessionContext {
            rendered_at: now - Duration::seconds(secs),
            source_page: "landing".to_owned(),
        };
        (session, now)
    }

    #[test]
    fn valid_submission_passes() {
        let (session, now) = session_rendered_secs_ago(10);
        assert!(validate(&valid_submission(), &session, now, DEFAULT_MIN_FORM_SECONDS).is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        let (session, now) = session_rendered_secs_ago(10);
        let mut s = valid_submission();
        s.full_name = "   ".to_owned();
        let errs = validate(&s, &session, now, DEFAULT_MIN_FORM_SECONDS).unwrap_err();
        assert_eq!(errs, vec![Violation::NameRequired]);
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for bad in ["", "jane", "jane@", "@example.com", "jane@example", "jane @example.com"] {
            let (session, now) = session_rendered_secs_ago(10);
            let mut s = valid_submission();
            s.email = bad.to_owned();
            let errs = validate(&s, &session, now, DEFAULT_MIN_FORM_SECONDS).unwrap_err();
            assert_eq!(errs, vec![Violation::InvalidEmail], "email: {bad:?}");
        }
    }

    #[test]
    fn uppercase_email_is_accepted() {
        assert!(valid_email("JANE@EXAMPLE.COM"));
        assert!(valid_email("jane.doe+list@sub.example.co"));
    }

    #[test]
    fn missing_consent_is_rejected() {
        let (session, now) = session_rendered_secs_ago(10);
        let mut s = valid_submission();
        s.consent = false;
        let errs = validate(&s, &session, now, DEFAULT_MIN_FORM_SECONDS).unwrap_err();
        assert_eq!(errs, vec![Violation::ConsentRequired]);
    }

    #[test]
    fn honeypot_content_is_rejected_despite_valid_fields() {
        let (session, now) = session_rendered_secs_ago(10);
        let mut s = valid_submission();
        s.honeypot = "x".to_owned();
        let errs = validate(&s, &session, now, DEFAULT_MIN_FORM_SECONDS).unwrap_err();
        assert_eq!(errs, vec![Violation::SpamDetected]);
    }

    #[test]
    fn too_fast_submission_is_rejected() {
        let (session, now) = session_rendered_secs_ago(1);
        let errs =
            validate(&valid_submission(), &session, now, DEFAULT_MIN_FORM_SECONDS).unwrap_err();
        assert_eq!(errs, vec![Violation::TooFast]);
    }

    #[test]
    fn exactly_at_threshold_is_accepted() {
        let (session, now) = session_rendered_secs_ago(3);
        assert!(validate(&valid_submission(), &session, now, DEFAULT_MIN_FORM_SECONDS).is_ok());
    }

    #[test]
    fn all_rules_reported_in_order() {
        let (session, now) = session_rendered_secs_ago(0);
        let s = Submission {
            honeypot: "bot".to_owned(),
            ..Submission::default()
        };
        let errs = validate(&s, &session, now, DEFAULT_MIN_FORM_SECONDS).unwrap_err();
        assert_eq!(
            errs,
            vec![
                Violation::NameRequired,
                Violation::InvalidEmail,
                Violation::ConsentRequired,
                Violation::SpamDetected,
                Violation::TooFast,
            ]
        );
    }

    #[test]
    fn violation_messages_match_the_form_copy() {
        assert_eq!(Violation::NameRequired.to_string(), "Name required");
        assert_eq!(Violation::TooFast.to_string(), "Too quick; try again");
        assert_eq!(Violation::SpamDetected.code(), "spam_detected");
    }
}
