//! CheckHealthHandler - Store reachability plus collaborator configuration.

use std::sync::Arc;

use crate::ports::{ChatMessageRepository, RepositoryError};

/// Whether an external secret or endpoint was supplied. Values are never exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Configured,
    Missing,
}

impl Presence {
    pub fn from_flag(configured: bool) -> Self {
        if configured {
            Presence::Configured
        } else {
            Presence::Missing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Presence::Configured => "configured",
            Presence::Missing => "missing",
        }
    }
}

/// Snapshot returned by a successful health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub groq_api_key: Presence,
    pub n8n_webhook: Presence,
}

/// Handler for the health check.
///
/// Succeeds only if the message store answers a ping.
pub struct CheckHealthHandler {
    repository: Arc<dyn ChatMessageRepository>,
    groq_api_key: Presence,
    n8n_webhook: Presence,
}

impl CheckHealthHandler {
    pub fn new(
        repository: Arc<dyn ChatMessageRepository>,
        groq_api_key_configured: bool,
        n8n_webhook_configured: bool,
    ) -> Self {
        Self {
            repository,
            groq_api_key: Presence::from_flag(groq_api_key_configured),
            n8n_webhook: Presence::from_flag(n8n_webhook_configured),
        }
    }

    pub async fn handle(&self) -> Result<HealthReport, RepositoryError> {
        self.repository.ping().await.map_err(|e| {
            tracing::error!(error = %e, "health check: store unreachable");
            e
        })?;

        Ok(HealthReport {
            groq_api_key: self.groq_api_key,
            n8n_webhook: self.n8n_webhook,
        })
    }
}
