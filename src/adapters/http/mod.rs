//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with DTOs, handlers and routes. Everything is
//! served under `/api`.

pub mod chat;
pub mod middleware;
pub mod system;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use chat::{chat_routes, ChatHandlers};
pub use system::{system_routes, SystemHandlers};

/// Assembles the full application router with shared middleware.
pub fn build_router(chat: ChatHandlers, system: SystemHandlers, server: &ServerConfig) -> Router {
    let api = Router::new()
        .merge(system_routes(system))
        .merge(chat_routes(chat));

    // Nesting maps the inner "/" to "/api" only; the banner is also served at "/api/".
    let router = Router::new()
        .nest("/api", api)
        .route("/api/", get(system::handlers::root));

    with_middleware(router, server)
}

/// Tracing, a request timeout answering 408 with an `ErrorResponse`, and CORS.
pub fn with_middleware(router: Router, server: &ServerConfig) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(axum::middleware::from_fn(middleware::timeout_response))
        .layer(cors_layer(server))
}

/// Any origin unless a parseable allow-list is configured.
pub fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let cors = CorsLayer::new().allow_headers(Any).allow_methods(Any);
    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryChatMessageRepository;
    use crate::application::handlers::chat::testing::{
        EchoDrafter, EchoResponder, FixedClassifier, RecordingDispatcher,
    };
    use crate::application::handlers::chat::{
        ApproveActionHandler, ClearHistoryHandler, GetHistoryHandler, SendChatMessageHandler,
    };
    use crate::application::handlers::system::CheckHealthHandler;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router(server: &ServerConfig) -> Router {
        let repo = Arc::new(InMemoryChatMessageRepository::new());
        let chat = ChatHandlers::new(
            Arc::new(SendChatMessageHandler::new(
                repo.clone(),
                Arc::new(FixedClassifier::returning(json!({"intent": "general_chat"}))),
                Arc::new(EchoDrafter::default()),
                Arc::new(EchoResponder::default()),
            )),
            Arc::new(ApproveActionHandler::new(
                repo.clone(),
                Arc::new(RecordingDispatcher::succeeding()),
            )),
            Arc::new(GetHistoryHandler::new(repo.clone())),
            Arc::new(ClearHistoryHandler::new(repo.clone())),
        );
        let system = SystemHandlers::new(Arc::new(CheckHealthHandler::new(repo, false, false)));
        build_router(chat, system, server)
    }

    #[tokio::test]
    async fn endpoints_live_under_api_prefix() {
        let app = router(&ServerConfig::default());

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn allows_any_origin_by_default() {
        let app = router(&ServerConfig::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn restricts_to_configured_origins() {
        let server = ServerConfig {
            cors_origins: Some("http://app.local, http://other.local".to_string()),
            ..ServerConfig::default()
        };
        let app = router(&server);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/")
                    .header(header::ORIGIN, "http://app.local")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://app.local"
        );
    }

    #[tokio::test]
    async fn banner_is_served_with_and_without_trailing_slash() {
        let app = router(&ServerConfig::default());

        for uri in ["/api/", "/api"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);

            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["version"], "1.0");
        }
    }

    #[tokio::test]
    async fn expired_request_answers_structured_408() {
        let server = ServerConfig {
            request_timeout_secs: 1,
            ..ServerConfig::default()
        };
        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                "done"
            }),
        );
        let app = with_middleware(slow, &server);

        let response = app
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "REQUEST_TIMEOUT");
        assert_eq!(body["message"], "Request timed out: GET /slow");
    }

    #[tokio::test]
    async fn fast_requests_pass_through_timeout_layer_untouched() {
        let app = with_middleware(
            Router::new().route("/fast", get(|| async { "ok" })),
            &ServerConfig::default(),
        );

        let response = app
            .oneshot(Request::builder().uri("/fast").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
