//! Automation webhook configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// n8n webhook configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Endpoint receiving approved actions
    pub n8n_webhook_url: Option<String>,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl WebhookConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The configured URL, if non-empty.
    pub fn url(&self) -> Option<&str> {
        self.n8n_webhook_url.as_deref().filter(|u| !u.is_empty())
    }

    /// Check if a webhook URL is configured
    pub fn is_configured(&self) -> bool {
        self.url().is_some()
    }

    /// Validate webhook configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = self.url() {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidWebhookUrl);
            }
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            n8n_webhook_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_defaults() {
        let config = WebhookConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = WebhookConfig {
            n8n_webhook_url: Some("ftp://example.com/hook".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_url() {
        let config = WebhookConfig {
            n8n_webhook_url: Some("https://n8n.example.com/webhook/abc".to_string()),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert!(config.validate().is_ok());
    }
}
