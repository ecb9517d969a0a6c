//! HTTP routes for service-level endpoints.

use axum::{routing::get, Router};

use super::handlers::{health, root, SystemHandlers};

pub fn system_routes(handlers: SystemHandlers) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryChatMessageRepository;
    use crate::application::handlers::chat::testing::FailingRepository;
    use crate::application::handlers::system::CheckHealthHandler;
    use crate::ports::ChatMessageRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(repo: Arc<dyn ChatMessageRepository>, groq: bool, webhook: bool) -> Router {
        let handler = CheckHealthHandler::new(repo, groq, webhook);
        system_routes(SystemHandlers::new(Arc::new(handler)))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn root_returns_banner() {
        let app = app(Arc::new(InMemoryChatMessageRepository::new()), true, true);

        let (status, body) = get_json(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["version"], "1.0");
        assert!(body["message"].as_str().unwrap().contains("Elva AI Backend"));
    }

    #[tokio::test]
    async fn health_reports_configuration() {
        let app = app(Arc::new(InMemoryChatMessageRepository::new()), true, false);

        let (status, body) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
        assert_eq!(body["groq_api_key"], "configured");
        assert_eq!(body["n8n_webhook"], "missing");
    }

    #[tokio::test]
    async fn health_fails_when_store_unreachable() {
        let app = app(Arc::new(FailingRepository), true, true);

        let (status, body) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Health check failed:"));
    }
}
