//! n8n webhook ActionDispatcher implementation.
//!
//! Posts approved actions to an n8n webhook as:
//!
//! ```json
//! {
//!   "user_id": "default_user",
//!   "session_id": "abc",
//!   "intent": "send_email",
//!   "data": { "intent": "send_email", "recipient_name": "Priya" },
//!   "timestamp": "2024-01-15T10:00:00.000000Z"
//! }
//! ```
//!
//! Any HTTP answer yields a `DispatchOutcome`; only transport failures are
//! errors. A single attempt is made per approval.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::domain::chat::{DispatchOutcome, IntentData};
use crate::domain::foundation::{SessionId, Timestamp, UserId};
use crate::ports::{ActionDispatcher, DispatchError};

/// Error reported when approvals arrive but no webhook is configured.
pub const WEBHOOK_NOT_CONFIGURED: &str = "N8N webhook URL not configured";

/// Body sent to the webhook.
#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    pub user_id: &'a str,
    pub session_id: &'a str,
    pub intent: &'a str,
    pub data: Value,
    pub timestamp: String,
}

impl<'a> WebhookPayload<'a> {
    pub fn new(
        action: &'a IntentData,
        user_id: &'a UserId,
        session_id: &'a SessionId,
    ) -> Result<Self, DispatchError> {
        let data = action
            .to_value()
            .map_err(|e| DispatchError::Encoding(e.to_string()))?;

        Ok(Self {
            user_id: user_id.as_str(),
            session_id: session_id.as_str(),
            intent: action.name(),
            data,
            timestamp: Timestamp::now().to_rfc3339_z(),
        })
    }
}

/// Dispatches approved actions to an n8n webhook.
pub struct N8nWebhookDispatcher {
    webhook_url: Option<String>,
    timeout: Duration,
    client: Client,
}

impl N8nWebhookDispatcher {
    /// Creates a dispatcher. With no URL every dispatch reports a remote failure.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Transport` if the HTTP client cannot be built.
    pub fn new(webhook_url: Option<String>, timeout: Duration) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DispatchError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            webhook_url: webhook_url.filter(|u| !u.is_empty()),
            timeout,
            client,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    fn transport_error(&self, e: reqwest::Error) -> DispatchError {
        if e.is_timeout() {
            DispatchError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            DispatchError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl ActionDispatcher for N8nWebhookDispatcher {
    async fn dispatch(
        &self,
        action: &IntentData,
        user_id: &UserId,
        session_id: &SessionId,
    ) -> Result<DispatchOutcome, DispatchError> {
        let Some(url) = self.webhook_url.as_deref() else {
            tracing::warn!(intent = action.name(), "approval received but no webhook configured");
            return Ok(DispatchOutcome::from_payload(json!({
                "success": false,
                "error": WEBHOOK_NOT_CONFIGURED,
            })));
        };

        let payload = WebhookPayload::new(action, user_id, session_id)?;

        tracing::info!(
            intent = payload.intent,
            session_id = payload.session_id,
            "sending action to webhook"
        );

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!(status = status.as_u16(), error = %e, "failed to read webhook response body");
            self.transport_error(e)
        })?;
        let body_value = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));

        let outcome = if status.is_success() {
            DispatchOutcome::from_payload(json!({
                "success": true,
                "status_code": status.as_u16(),
                "response": body_value,
            }))
        } else {
            tracing::warn!(status = status.as_u16(), "webhook answered with an error status");
            DispatchOutcome::from_payload(json!({
                "success": false,
                "status_code": status.as_u16(),
                "error": body_value,
            }))
        };

        Ok(outcome)
    }
}
