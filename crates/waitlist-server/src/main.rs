//! Waitlist server entry point.
//!
//! Bootstraps the CSV lead store and the configured notification sinks,
//! then starts the Axum HTTP server with graceful shutdown.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use waitlist_core::intake::IntakeHandler;
use waitlist_core::sheets::{ServiceAccountKey, SheetsSink};
use waitlist_core::sink::{NotificationSink, Notifier};
use waitlist_core::webhook::WebhookSink;
use waitlist_store::{CsvStore, LeadStore};

use waitlist_server::config::{ServerConfig, SheetsCredentials};
use waitlist_server::routes;
use waitlist_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(data_dir = %config.data_dir, "waitlist server starting");

    let state = build_app_state(&config)?;
    let app = routes::build_router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "waitlist server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("waitlist server stopped");
    Ok(())
}

/// Build the shared application state: store, sinks, intake pipeline.
fn build_app_state(config: &ServerConfig) -> anyhow::Result<Arc<AppState>> {
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("failed to create data dir '{}'", config.data_dir))?;

    let csv_path = Path::new(&config.data_dir).join("waitlist.csv");
    info!(path = %csv_path.display(), "using CSV lead store");
    let store: Arc<dyn LeadStore> = Arc::new(CsvStore::open(csv_path));

    let mut sinks: Vec<Arc<dyn NotificationSink>> = Vec::new();

    if let Some(ref webhook) = config.webhook {
        match WebhookSink::new(webhook.url.clone()) {
            Ok(sink) => {
                info!(url = %webhook.url, "webhook sink registered");
                sinks.push(Arc::new(sink));
            }
            Err(e) => warn!(error = %e, "webhook sink disabled"),
        }
    }

    if let Some(ref sheets) = config.sheets {
        let key = match sheets.credentials {
            SheetsCredentials::Inline(ref json) => ServiceAccountKey::from_json(json),
            SheetsCredentials::File(ref path) => ServiceAccountKey::from_file(path),
        };
        match key.and_then(|key| SheetsSink::new(key, sheets.spreadsheet_id.clone())) {
            Ok(sink) => {
                info!(spreadsheet = %sheets.spreadsheet_id, "sheets sink registered");
                sinks.push(Arc::new(sink));
            }
            Err(e) => warn!(error = %e, "sheets sink disabled"),
        }
    }

    if sinks.is_empty() {
        info!("no notification sinks configured");
    }

    let notifier = Arc::new(Notifier::new(sinks));
    let intake = IntakeHandler::with_min_form_seconds(
        Arc::clone(&store),
        notifier,
        config.min_form_seconds,
    );

    Ok(Arc::new(AppState { intake, store }))
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
