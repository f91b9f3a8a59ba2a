//! Webhook delivery.

use std::time::Duration;

use runbeacon_config::DeliveryConfig;

use crate::compose::SlackPayload;

/// Default timeout for the webhook POST.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the delivery attempt.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// Payload failed to serialize.
    #[error("failed to serialize webhook payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// Transport-level failure (connect, timeout).
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Webhook answered with a non-success status.
    #[error("webhook returned HTTP {status}")]
    Api { status: u16 },
}

/// Posts composed messages to a Slack incoming webhook.
///
/// Delivery is a single best-effort attempt: no retry, no queueing, and the
/// response body is never inspected beyond its status code.
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    http: reqwest::Client,
    timeout: Duration,
}

impl SlackNotifier {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the delivery timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Deliver one payload to the configured webhook.
    ///
    /// The connection target comes from the webhook URL's scheme and host;
    /// its path selects the webhook in the request line. The body is a
    /// URL-encoded form whose single `payload` field holds the JSON payload.
    pub async fn deliver(
        &self,
        config: &DeliveryConfig,
        payload: &SlackPayload,
    ) -> Result<(), DeliveryError> {
        let body = serde_json::to_string(payload)?;

        let response = self
            .http
            .post(config.webhook_url.clone())
            .form(&[("payload", body.as_str())])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DeliveryError::Api {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}

impl Default for SlackNotifier {
    fn default() -> Self {
        Self::new()
    }
}
