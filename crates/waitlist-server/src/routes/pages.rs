//! Landing and About pages.
//!
//! Server-rendered HTML with inline CSS — no JS framework. Both pages carry
//! an equivalent signup form that POSTs form-encoded data to `/signup`,
//! including a hidden render timestamp for the anti-bot timing check and a
//! visually hidden honeypot input. Submission results re-render the page
//! with a banner; the Landing form collects the full field set, the About
//! form a shorter one.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use waitlist_core::error::IntakeError;
use waitlist_core::intake::SignupOutcome;
use waitlist_core::validator::{SessionContext, Submission};

use crate::error::AppError;
use crate::state::AppState;

const APP_NAME: &str = "NYC Restaurant & Bar Navigator";

/// Build the page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(landing_page))
        .route("/about", get(about_page))
        .route("/signup", post(signup))
}

// ── Handlers ─────────────────────────────────────────────────────────

async fn landing_page() -> Html<String> {
    Html(render_landing(Utc::now().timestamp(), ""))
}

async fn about_page() -> Html<String> {
    Html(render_about(Utc::now().timestamp(), ""))
}

/// Form-encoded signup submission from either page.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
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
    /// Checkbox — present ("on") when ticked.
    #[serde(default)]
    pub consent: Option<String>,
    #[serde(default)]
    pub honeypot: String,
    #[serde(default)]
    pub rendered_epoch: i64,
    #[serde(default)]
    pub source_page: String,
}

async fn signup(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SignupForm>,
) -> Result<Html<String>, AppError> {
    let rendered_at = DateTime::from_timestamp(form.rendered_epoch, 0)
        .ok_or_else(|| AppError::BadRequest("invalid rendered_epoch".to_owned()))?;

    let from_about = form.source_page == "about";
    let session = SessionContext {
        rendered_at,
        source_page: if from_about {
            "about".to_owned()
        } else {
            "landing".to_owned()
        },
    };

    let submission = Submission {
        full_name: form.full_name,
        email: form.email,
        phone: form.phone,
        business_type: form.business_type,
        borough: form.borough,
        alcohol: form.alcohol,
        outdoor_seating: form.outdoor_seating,
        role: form.role,
        launch_timeframe: form.launch_timeframe,
        notes: form.notes,
        consent: form.consent.is_some(),
        honeypot: form.honeypot,
    };

    let banner = match state.intake.handle(submission, &session).await {
        Ok(SignupOutcome::New) => {
            r#"<div class="banner ok">You're on the list!</div>"#.to_owned()
        }
        Ok(SignupOutcome::Duplicate) => {
            r#"<div class="banner info">Already signed up with this email.</div>"#.to_owned()
        }
        Err(IntakeError::Rejected(violations)) => {
            let mut items = String::new();
            for v in violations {
                items.push_str(&format!("<li>{v}</li>"));
            }
            format!(r#"<div class="banner err"><ul>{items}</ul></div>"#)
        }
        Err(e @ IntakeError::Store(_)) => return Err(AppError::from(e)),
    };

    // Re-arm the timing check for the re-rendered form.
    let epoch = Utc::now().timestamp();
    let html = if from_about {
        render_about(epoch, &banner)
    } else {
        render_landing(epoch, &banner)
    };
    Ok(Html(html))
}

// ── Rendering ────────────────────────────────────────────────────────

const PAGE_CSS: &str = r#"<style>
  :root { color-scheme: dark; }
  body { margin: 0 auto; max-width: 1100px; padding: 2rem 1rem;
         font-family: system-ui, sans-serif; background: #0B1220; color: #E2E8F0;
         background-image: radial-gradient(rgba(255,255,255,0.06) 1px, transparent 1px);
         background-size: 18px 18px; }
  a { color: #7DD3FC; }
  nav a { margin-right: 14px; }
  .hero { background: linear-gradient(180deg, rgba(14,165,233,0.12), rgba(14,165,233,0.02));
          border: 1px solid rgba(148,163,184,0.25); border-radius: 18px;
          padding: 28px; margin-bottom: 18px; }
  .pill { display: inline-block; padding: 6px 10px; border-radius: 999px;
          background: rgba(14,165,233,0.15); border: 1px solid rgba(14,165,233,0.35);
          font-size: 0.8rem; margin-bottom: 8px; }
  .cols { display: flex; gap: 16px; flex-wrap: wrap; }
  .cols > div { flex: 1 1 240px; }
  .card { border: 1px solid rgba(148,163,184,0.25); background: rgba(255,255,255,0.02);
          border-radius: 16px; padding: 18px; }
  .muted { color: #94A3B8; }
  .badge { display: inline-block; border: 1px solid rgba(148,163,184,0.35);
           padding: 4px 10px; border-radius: 999px; margin: 4px; font-size: 0.85rem; }
  .footer { margin-top: 26px; color: #94A3B8; font-size: 0.85rem; }
  form { max-width: 560px; }
  label { display: block; margin-top: 12px; }
  input[type=text], input[type=email], select, textarea {
    width: 100%; padding: 8px; border-radius: 8px;
    border: 1px solid rgba(148,163,184,0.35); background: #0F172A; color: inherit; }
  button { margin-top: 16px; padding: 10px 18px; border-radius: 10px; border: 0;
           background: #0EA5E9; color: #06232F; font-weight: 600; cursor: pointer; }
  .banner { border-radius: 12px; padding: 12px 16px; margin: 16px 0; }
  .banner.ok { background: rgba(34,197,94,0.15); border: 1px solid rgba(34,197,94,0.4); }
  .banner.info { background: rgba(14,165,233,0.15); border: 1px solid rgba(14,165,233,0.4); }
  .banner.err { background: rgba(239,68,68,0.15); border: 1px solid rgba(239,68,68,0.4); }
  .hp { position: absolute; left: -10000px; width: 1px; height: 1px; overflow: hidden; }
  details { margin: 8px 0; }
</style>"#;

const LANDING_INTRO: &str = r#"
<div class="hero">
  <div class="pill">NYC Restaurants &amp; Bars &middot; Early Access</div>
  <h1>Open your spot without opening a law book.</h1>
  <p class="muted">An AI guide that turns NYC permits into a clear, step-by-step roadmap.</p>
</div>
<div class="cols">
  <div><strong>&#128274; Privacy-first</strong><br>We only use your info for updates.</div>
  <div><strong>&#127961; NYC-specific</strong><br>Built for DOH, FDNY, DOB, SLA, DOT.</div>
  <div><strong>&#9889; Fast</strong><br>No fluff, just clarity.</div>
</div>
<h2>How it works</h2>
<div class="cols">
  <div><strong>1) Onboard</strong><br>Tell us your concept + location.</div>
  <div><strong>2) Chat</strong><br>AI asks smart follow-ups.</div>
  <div><strong>3) Roadmap</strong><br>Get permits, docs, timelines.</div>
</div>
<h2>Who is it for?</h2>
<div class="card">
  <span class="badge">&#127837; Restaurant</span>
  <span class="badge">&#127864; Bar</span>
  <span class="badge">&#9749; Cafe</span>
</div>
<h2>Pricing (coming soon)</h2>
<div class="cols">
  <div><strong>Free</strong><br>Checklist preview</div>
  <div><strong>Pro ($49/mo)</strong><br>Full roadmap + reminders</div>
  <div><strong>Premium ($199/project)</strong><br>Form autofill + review</div>
</div>
"#;

const FAQ: &str = r#"
<h2>FAQ</h2>
<details><summary>Is this legal advice?</summary><p>No, we provide guidance with citations. Not legal advice.</p></details>
<details><summary>Which agencies?</summary><p>DOH, FDNY, DOB, SLA, DOT.</p></details>
<details><summary>When launch?</summary><p>Inviting early testers soon.</p></details>
<details><summary>Data use?</summary><p>Only to contact you about this product.</p></details>
"#;

const ABOUT_INTRO: &str = r#"
<h2>About</h2>
<p>Our mission: make opening a restaurant or bar in NYC clear, fast, and fair.</p>
<p><strong>Problem:</strong> Fragmented agencies, costly expeditors, delays.</p>
<p><strong>Solution:</strong> An AI guide that asks you plain-English questions, then generates a
personalized permit roadmap with docs, fees, timelines, and links.</p>
<p><strong>Next:</strong> autofill forms, reminders, human review, expansion beyond NYC.</p>
"#;

fn page_shell(title: &str, body: &str) -> String {
    let year = Utc::now().format("%Y");
    let mut html = String::with_capacity(16384);
    html.push_str("<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str(&format!("<title>{title} &middot; {APP_NAME}</title>"));
    html.push_str(PAGE_CSS);
    html.push_str("</head><body>");
    html.push_str(&format!(
        "<nav><strong>{APP_NAME}</strong> &nbsp; <a href=\"/\">Landing</a><a href=\"/about\">About</a></nav>"
    ));
    html.push_str(body);
    html.push_str(&format!(
        "<div class=\"footer\">&copy; {year} {APP_NAME}. Not legal advice.</div>"
    ));
    html.push_str("</body></html>");
    html
}

/// Shared select options.
const BUSINESS_OPTIONS: &str = "<option>Restaurant</option><option>Bar</option><option>Cafe</option><option>Bakery</option>";
const ROLE_OPTIONS: &str =
    "<option>Owner</option><option>Manager</option><option>Consultant</option><option>Other</option>";
const TIMEFRAME_OPTIONS: &str =
    "<option>Now</option><option>1\u{2013}3 mo</option><option>3\u{2013}6 mo</option><option>Exploring</option>";

/// Hidden fields common to both forms: source page, render timestamp, honeypot.
fn hidden_fields(source_page: &str, rendered_epoch: i64) -> String {
    format!(
        r#"<input type="hidden" name="source_page" value="{source_page}">
<input type="hidden" name="rendered_epoch" value="{rendered_epoch}">
<div class="hp" aria-hidden="true"><label>Leave this field empty<input type="text" name="honeypot" tabindex="-1" autocomplete="off"></label></div>"#
    )
}

fn render_landing(rendered_epoch: i64, banner: &str) -> String {
    let hidden = hidden_fields("landing", rendered_epoch);
    let body = format!(
        r#"{LANDING_INTRO}
<h2>Join the NYC launch list</h2>
{banner}
<form method="post" action="/signup">
  <label>Full Name*<input type="text" name="full_name"></label>
  <label>Email*<input type="email" name="email"></label>
  <label>Business Type*<select name="business_type">{BUSINESS_OPTIONS}</select></label>
  <label>Borough*<select name="borough"><option>Manhattan</option><option>Brooklyn</option><option>Queens</option><option>Bronx</option><option>Staten Island</option></select></label>
  <label>Serve alcohol?<select name="alcohol"><option>Yes</option><option>No</option></select></label>
  <label>Outdoor seating?<select name="outdoor_seating"><option>Yes</option><option>No</option></select></label>
  <label>Role*<select name="role">{ROLE_OPTIONS}</select></label>
  <label>Launch timeframe*<select name="launch_timeframe">{TIMEFRAME_OPTIONS}</select></label>
  <label>Notes (optional)<textarea name="notes" rows="3"></textarea></label>
  {hidden}
  <label><input type="checkbox" name="consent" checked> I agree to be contacted.</label>
  <button type="submit">Request Early Access &#9993;</button>
</form>
{FAQ}"#
    );
    page_shell("Early Access", &body)
}

fn render_about(rendered_epoch: i64, banner: &str) -> String {
    let hidden = hidden_fields("about", rendered_epoch);
    let body = format!(
        r#"{ABOUT_INTRO}
<h2>Join the launch list</h2>
{banner}
<form method="post" action="/signup">
  <label>Full Name*<input type="text" name="full_name"></label>
  <label>Email*<input type="email" name="email"></label>
  <label>Role*<select name="role">{ROLE_OPTIONS}</select></label>
  <label>Business*<select name="business_type">{BUSINESS_OPTIONS}</select></label>
  <label>Launch timeframe*<select name="launch_timeframe">{TIMEFRAME_OPTIONS}</select></label>
  {hidden}
  <label><input type="checkbox" name="consent" checked> I agree to be contacted.</label>
  <button type="submit">Request Early Access &#9993;</button>
</form>"#
    );
    page_shell("About", &body)
}
