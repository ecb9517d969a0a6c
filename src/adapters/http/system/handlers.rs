//! HTTP handlers for service-level endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::chat::dto::ErrorResponse;
use crate::application::handlers::system::CheckHealthHandler;

use super::dto::{HealthResponse, RootResponse};

#[derive(Clone)]
pub struct SystemHandlers {
    health_handler: Arc<CheckHealthHandler>,
}

impl SystemHandlers {
    pub fn new(health_handler: Arc<CheckHealthHandler>) -> Self {
        Self { health_handler }
    }
}

/// GET /api/ - Liveness banner
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse::default())
}

/// GET /api/health - Store reachability and collaborator configuration
pub async fn health(State(handlers): State<SystemHandlers>) -> Response {
    match handlers.health_handler.handle().await {
        Ok(report) => (StatusCode::OK, Json(HealthResponse::from(report))).into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::service_unavailable(format!(
                "Health check failed: {}",
                e
            ))),
        )
            .into_response(),
    }
}
