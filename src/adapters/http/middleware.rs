//! Shared HTTP middleware.
//!
//! # Usage
//!
//! ```ignore
//! let app = Router::new()
//!     .layer(TimeoutLayer::new(timeout))
//!     .layer(middleware::from_fn(timeout_response));
//! ```

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::chat::dto::ErrorResponse;

/// Replaces the bare 408 emitted by the timeout layer with an `ErrorResponse`.
///
/// Must sit outside the `TimeoutLayer`.
pub async fn timeout_response(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    tracing::warn!(%method, path = %path, "request timed out");
    (
        StatusCode::REQUEST_TIMEOUT,
        Json(ErrorResponse::request_timeout(format!(
            "Request timed out: {} {}",
            method, path
        ))),
    )
        .into_response()
}
