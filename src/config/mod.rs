//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ELVA_` prefix and nested values use double underscores as separators.
//!
//! Missing collaborator secrets are not fatal: the service starts without them
//! and `/api/health` reports them as missing.
//!
//! # Example
//!
//! ```no_run
//! use elva::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod ai;
mod database;
mod error;
mod server;
mod webhook;

pub use ai::AiConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use webhook::WebhookConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Message store configuration (PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// LLM provider configuration (Groq)
    #[serde(default)]
    pub ai: AiConfig,

    /// Automation webhook configuration (n8n)
    #[serde(default)]
    pub webhook: WebhookConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ELVA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Falls back to the unprefixed names used by earlier deployments
    ///
    /// # Environment Variable Format
    ///
    /// - `ELVA__SERVER__PORT=8001` -> `server.port = 8001`
    /// - `ELVA__AI__GROQ_API_KEY=...` -> `ai.groq_api_key = ...`
    /// - `GROQ_API_KEY`, `N8N_WEBHOOK_URL`, `DATABASE_URL`, `DB_NAME` are honoured
    ///   when the prefixed variable is absent
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ELVA")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.apply_legacy_env();
        Ok(config)
    }

    fn apply_legacy_env(&mut self) {
        fill_from_env(&mut self.ai.groq_api_key, "GROQ_API_KEY");
        fill_from_env(&mut self.webhook.n8n_webhook_url, "N8N_WEBHOOK_URL");
        fill_from_env(&mut self.database.url, "DATABASE_URL");
        fill_from_env(&mut self.database.name, "DB_NAME");
    }

    /// Validate structural configuration values
    ///
    /// Checks formats and ranges only. Absent secrets and URLs are allowed.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.ai.validate()?;
        self.webhook.validate()?;

        let required = self.min_request_timeout_secs();
        if self.server.request_timeout_secs <= required {
            return Err(ValidationError::RequestTimeoutTooShort {
                configured: self.server.request_timeout_secs,
                required,
            });
        }
        Ok(())
    }

    /// Longest a request may legitimately spend in its collaborators.
    ///
    /// A chat turn makes two sequential LLM calls (classify, then draft or
    /// reply); an approval makes one webhook call. Either may also wait for a
    /// pooled connection. The HTTP request timeout must exceed this.
    pub fn min_request_timeout_secs(&self) -> u64 {
        let chat = self.ai.timeout_secs.saturating_mul(2);
        let approve = self.webhook.timeout_secs;
        chat.max(approve)
            .saturating_add(self.database.acquire_timeout_secs)
    }
}

fn fill_from_env(slot: &mut Option<String>, var: &str) {
    if slot.as_deref().is_some_and(|v| !v.is_empty()) {
        return;
    }
    if let Ok(value) = std::env::var(var) {
        if !value.is_empty() {
            *slot = Some(value);
        }
    }
}
