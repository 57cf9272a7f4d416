//! End-to-end tests over the assembled router with an in-memory store.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceExt;

use waitlist_core::intake::IntakeHandler;
use waitlist_core::sink::Notifier;
use waitlist_server::routes::build_router;
use waitlist_server::state::AppState;
use waitlist_store::{LeadStore, MemoryStore};

fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(Notifier::new(Vec::new()));
    let intake = IntakeHandler::new(store.clone() as Arc<dyn LeadStore>, notifier);
    let state = Arc::new(AppState {
        intake,
        store: store.clone(),
    });
    (build_router(state), store)
}

fn signup_body(name: &str, email: &str) -> Value {
    json!({
        "full_name": name,
        "email": email,
        "business_type": "Restaurant",
        "borough": "Brooklyn",
        "consent": true,
        "rendered_epoch": Utc::now().timestamp() - 60,
        "source_page": "landing",
    })
}

async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get_text(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

#[tokio::test]
async fn signup_then_duplicate() {
    let (app, store) = test_app();

    let (status, body) = post_json(&app, "/v1/waitlist", &signup_body("Jane Doe", "JANE@Example.com")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "new");

    let (status, body) = post_json(&app, "/v1/waitlist", &signup_body("Jane Doe", "jane@example.com")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "duplicate");

    let records = store.load().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].email, "jane@example.com");
}

#[tokio::test]
async fn invalid_email_is_unprocessable() {
    let (app, store) = test_app();

    let (status, body) = post_json(&app, "/v1/waitlist", &signup_body("Jane Doe", "not-an-email")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "rejected");
    assert_eq!(body["violations"][0]["code"], "invalid_email");
    assert_eq!(body["violations"][0]["message"], "Invalid email");

    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_name_lists_the_violation() {
    let (app, _store) = test_app();

    let (status, body) = post_json(&app, "/v1/waitlist", &signup_body("", "jane@example.com")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["violations"][0]["code"], "name_required");
}

#[tokio::test]
async fn honeypot_rejects_the_submission() {
    let (app, store) = test_app();

    let mut body = signup_body("Jane Doe", "jane@example.com");
    body["honeypot"] = json!("bot");
    let (status, body) = post_json(&app, "/v1/waitlist", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["violations"][0]["code"], "spam_detected");
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn instant_submission_is_too_fast() {
    let (app, _store) = test_app();

    let mut body = signup_body("Jane Doe", "jane@example.com");
    body["rendered_epoch"] = json!(Utc::now().timestamp());
    let (status, body) = post_json(&app, "/v1/waitlist", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["violations"][0]["code"], "too_fast");
    assert_eq!(body["violations"][0]["message"], "Too quick; try again");
}

#[tokio::test]
async fn health_reports_lead_count() {
    let (app, _store) = test_app();

    let (_, body) = post_json(&app, "/v1/waitlist", &signup_body("Jane Doe", "jane@example.com")).await;
    assert_eq!(body["status"], "new");

    let (status, body) = post_json(&app, "/v1/waitlist/health", &Value::Null).await;
    // POST to health is not allowed; use GET.
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    drop(body);

    let (status, text) = get_text(&app, "/v1/waitlist/health").await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["status"], "ok");
    assert_eq!(value["leads"], 1);
}

#[tokio::test]
async fn landing_page_serves_the_form() {
    let (app, _store) = test_app();

    let (status, html) = get_text(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Join the NYC launch list"));
    assert!(html.contains("name=\"honeypot\""));
    assert!(html.contains("name=\"rendered_epoch\""));
}

#[tokio::test]
async fn about_page_serves_the_short_form() {
    let (app, _store) = test_app();

    let (status, html) = get_text(&app, "/about").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Join the launch list"));
    assert!(html.contains("value=\"about\""));
}

#[tokio::test]
async fn form_post_renders_success_then_duplicate_banner() {
    let (app, _store) = test_app();

    let epoch = Utc::now().timestamp() - 60;
    let form = format!(
        "full_name=Jane+Doe&email=jane%40example.com&business_type=Restaurant&borough=Brooklyn\
         &consent=on&rendered_epoch={epoch}&source_page=landing"
    );

    let post_form = |body: String| {
        let app = app.clone();
        async move {
            let response = app
                .oneshot(
                    Request::post("/signup")
                        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, String::from_utf8_lossy(&bytes).into_owned())
        }
    };

    let (status, html) = post_form(form.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("You're on the list!"));

    let (status, html) = post_form(form).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Already signed up with this email."));
}

#[tokio::test]
async fn csv_backed_app_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("waitlist.csv");

    let make_app = |path: &std::path::Path| {
        let store = Arc::new(waitlist_store::CsvStore::open(path));
        let intake = IntakeHandler::new(
            store.clone() as Arc<dyn LeadStore>,
            Arc::new(Notifier::new(Vec::new())),
        );
        build_router(Arc::new(AppState {
            intake,
            store,
        }))
    };

    let app = make_app(&path);
    let (status, body) = post_json(&app, "/v1/waitlist", &signup_body("Jane Doe", "jane@example.com")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "new");

    // A fresh store over the same file still knows the email.
    let restarted = make_app(&path);
    let (status, body) =
        post_json(&restarted, "/v1/waitlist", &signup_body("Jane Doe", "JANE@example.com")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "duplicate");
}

#[tokio::test]
async fn form_post_without_consent_lists_errors_inline() {
    let (app, _store) = test_app();

    let epoch = Utc::now().timestamp() - 60;
    let form = format!("full_name=&email=bad&rendered_epoch={epoch}&source_page=landing");
    let response = app
        .clone()
        .oneshot(
            Request::post("/signup")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8_lossy(&bytes);
    assert!(html.contains("Name required"));
    assert!(html.contains("Invalid email"));
    assert!(html.contains("Consent required"));
}
