//! Server configuration.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Sink capability is resolved here, once, at startup — the rest of the
//! system sees explicit `Option`s, never probes the environment again.

use std::net::SocketAddr;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Directory holding the waitlist CSV file.
    pub data_dir: String,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Minimum seconds between form render and submit (anti-bot check).
    pub min_form_seconds: i64,
    /// Webhook sink target (None when disabled).
    pub webhook: Option<WebhookConfig>,
    /// Google Sheets sink settings (None when disabled).
    pub sheets: Option<SheetsConfig>,
}

/// Webhook sink configuration.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// POST target for signup payloads.
    pub url: String,
}

/// Google Sheets sink configuration.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Where the service-account key comes from.
    pub credentials: SheetsCredentials,
    /// Target spreadsheet ID.
    pub spreadsheet_id: String,
}

/// Service-account key source: inline JSON or a file on disk.
#[derive(Debug, Clone)]
pub enum SheetsCredentials {
    Inline(String),
    File(String),
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (binds to `0.0.0.0`)
    /// - `WAITLIST_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:8601`)
    /// - `WAITLIST_DATA_DIR` — directory for `waitlist.csv` (default: `./data`)
    /// - `WAITLIST_LOG_LEVEL` — log filter (default: `info`)
    /// - `WAITLIST_MIN_FORM_SECONDS` — anti-bot submit threshold (default: `3`)
    /// - `USE_WEBHOOK` + `WEBHOOK_URL` — enable the webhook sink
    /// - `USE_GOOGLE_SHEETS` + `GOOGLE_SHEET_ID` — enable the Sheets sink
    /// - `GOOGLE_SERVICE_ACCOUNT_JSON` — inline service-account key
    /// - `GOOGLE_CREDENTIALS_FILE` — key file path (used when no inline JSON)
    #[must_use]
    pub fn from_env() -> Self {
        // Priority: WAITLIST_BIND_ADDR > PORT > default 127.0.0.1:8601
        let bind_addr = if let Ok(addr) = std::env::var("WAITLIST_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8601)))
        } else if let Ok(port_str) = std::env::var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(8601);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 8601))
        };

        let data_dir =
            std::env::var("WAITLIST_DATA_DIR").unwrap_or_else(|_| "./data".to_owned());

        let log_level =
            std::env::var("WAITLIST_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());

        let min_form_seconds = std::env::var("WAITLIST_MIN_FORM_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        let webhook = if env_flag("USE_WEBHOOK") {
            match std::env::var("WEBHOOK_URL") {
                Ok(url) if !url.trim().is_empty() => Some(WebhookConfig {
                    url: url.trim().to_owned(),
                }),
                _ => None,
            }
        } else {
            None
        };

        let sheets = if env_flag("USE_GOOGLE_SHEETS") {
            let spreadsheet_id = std::env::var("GOOGLE_SHEET_ID").unwrap_or_default();
            let credentials = std::env::var("GOOGLE_SERVICE_ACCOUNT_JSON")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(SheetsCredentials::Inline)
                .or_else(|| {
                    std::env::var("GOOGLE_CREDENTIALS_FILE")
                        .ok()
                        .filter(|v| !v.trim().is_empty())
                        .map(SheetsCredentials::File)
                });
            match credentials {
                Some(credentials) if !spreadsheet_id.is_empty() => Some(SheetsConfig {
                    credentials,
                    spreadsheet_id,
                }),
                _ => None,
            }
        } else {
            None
        };

        Self {
            bind_addr,
            data_dir,
            log_level,
            min_form_seconds,
            webhook,
            sheets,
        }
    }
}

/// Parse a boolean environment flag (`true`/`1` are on, case-insensitive).
fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| {
            let v = v.to_lowercase();
            v == "true" || v == "1"
        })
        .unwrap_or(false)
}
