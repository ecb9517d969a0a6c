//! HTTP routes for chat endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{approve_action, clear_history, get_history, send_chat_message, ChatHandlers};

/// Creates the chat router with all endpoints.
pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/chat", post(send_chat_message))
        .route("/approve", post(approve_action))
        .route("/history/:session_id", get(get_history).delete(clear_history))
        .with_state(handlers)
}
