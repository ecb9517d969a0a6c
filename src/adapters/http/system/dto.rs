//! Response types for service-level endpoints.

use serde::Serialize;

use crate::application::handlers::system::HealthReport;

pub const ROOT_MESSAGE: &str = "Elva AI Backend is running! 🤖✨";
pub const API_VERSION: &str = "1.0";

/// Response for GET /api/
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
}

impl Default for RootResponse {
    fn default() -> Self {
        Self {
            message: ROOT_MESSAGE,
            version: API_VERSION,
        }
    }
}

/// Response for GET /api/health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub groq_api_key: &'static str,
    pub n8n_webhook: &'static str,
}

impl From<HealthReport> for HealthResponse {
    fn from(report: HealthReport) -> Self {
        Self {
            status: "healthy",
            database: "connected",
            groq_api_key: report.groq_api_key.as_str(),
            n8n_webhook: report.n8n_webhook.as_str(),
        }
    }
}
