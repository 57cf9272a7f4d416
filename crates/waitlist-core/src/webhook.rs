//! HTTP webhook sink.
//!
//! POSTs each record as a JSON body to a configured URL with a bounded
//! timeout. No retry, response body ignored — a non-2xx status is reported
//! as an error for the notifier to log.

use std::time::Duration;

use waitlist_store::LeadRecord;

use crate::error::SinkError;
use crate::sink::NotificationSink;

/// Request timeout for webhook deliveries.
const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Sink that relays signups to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    url: String,
    client: reqwest::Client,
}

impl WebhookSink {
    /// Create a webhook sink targeting the given URL.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Request`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()
            .map_err(|e| SinkError::Request {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl NotificationSink for WebhookSink {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn deliver(&self, record: &LeadRecord) -> Result<(), SinkError> {
        let response = self
            .client
            .post(&self.url)
            .json(record)
            .send()
            .await
            .map_err(|e| SinkError::Request {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            // Body only for diagnostics; truncate so logs stay bounded.
            let body = response.text().await.unwrap_or_default();
            let body = body.chars().take(256).collect();
            return Err(SinkError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_any_url_string() {
        let sink = WebhookSink::new("https://hooks.example.com/waitlist").unwrap();
        assert_eq!(sink.name(), "webhook");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_request_error() {
        // Port 1 on loopback: nothing listens there, so connect fails fast.
        let sink = WebhookSink::new("http://127.0.0.1:1/waitlist").unwrap();
        let record = waitlist_store::NewLead {
            full_name: "Jane Doe".to_owned(),
            email: "jane@example.com".to_owned(),
            ..waitlist_store::NewLead::default()
        }
        .into_record(chrono::Utc::now());

        let err = sink.deliver(&record).await.unwrap_err();
        assert!(matches!(err, SinkError::Request { .. }));
    }
}
