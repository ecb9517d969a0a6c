//! HTTP handlers for chat endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::chat::{
    ApproveActionCommand, ApproveActionHandler, ClearHistoryCommand, ClearHistoryHandler,
    GetHistoryHandler, GetHistoryQuery, SendChatMessageCommand, SendChatMessageHandler,
};
use crate::domain::chat::ChatError;

use super::dto::{
    ApproveRequest, ApproveResponse, ChatRequest, ChatResponse, ClearHistoryResponse,
    ErrorResponse, HistoryResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ChatHandlers {
    send_handler: Arc<SendChatMessageHandler>,
    approve_handler: Arc<ApproveActionHandler>,
    history_handler: Arc<GetHistoryHandler>,
    clear_handler: Arc<ClearHistoryHandler>,
}

impl ChatHandlers {
    pub fn new(
        send_handler: Arc<SendChatMessageHandler>,
        approve_handler: Arc<ApproveActionHandler>,
        history_handler: Arc<GetHistoryHandler>,
        clear_handler: Arc<ClearHistoryHandler>,
    ) -> Self {
        Self {
            send_handler,
            approve_handler,
            history_handler,
            clear_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/chat - Classify a message and answer or draft an action
pub async fn send_chat_message(
    State(handlers): State<ChatHandlers>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return handle_rejection(rejection),
    };

    let cmd = SendChatMessageCommand {
        message: req.message,
        session_id: req.session_id,
        user_id: req.user_id,
    };

    match handlers.send_handler.handle(cmd).await {
        Ok(message) => (StatusCode::OK, Json(ChatResponse::from(&message))).into_response(),
        Err(e) => handle_chat_error(e),
    }
}

/// POST /api/approve - Approve or reject a drafted action
pub async fn approve_action(
    State(handlers): State<ChatHandlers>,
    body: Result<Json<ApproveRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return handle_rejection(rejection),
    };

    let cmd = ApproveActionCommand {
        session_id: req.session_id,
        message_id: req.message_id,
        approved: req.approved,
        edited_data: req.edited_data,
    };

    match handlers.approve_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(ApproveResponse::from(result))).into_response(),
        Err(e) => handle_chat_error(e),
    }
}

/// GET /api/history/:session_id - Messages of a session, oldest first
pub async fn get_history(
    State(handlers): State<ChatHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    match handlers
        .history_handler
        .handle(GetHistoryQuery { session_id })
        .await
    {
        Ok(messages) => (StatusCode::OK, Json(HistoryResponse::from(messages))).into_response(),
        Err(e) => handle_chat_error(e),
    }
}

/// DELETE /api/history/:session_id - Remove every message of a session
pub async fn clear_history(
    State(handlers): State<ChatHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    match handlers
        .clear_handler
        .handle(ClearHistoryCommand { session_id })
        .await
    {
        Ok(result) => (StatusCode::OK, Json(ClearHistoryResponse::from(result))).into_response(),
        Err(e) => handle_chat_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_rejection(rejection: JsonRejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(rejection.body_text())),
    )
        .into_response()
}

fn handle_chat_error(error: ChatError) -> Response {
    match error {
        ChatError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        ChatError::MessageNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Message not found")),
        )
            .into_response(),
        e @ ChatError::AlreadyDecided { .. } => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(e.to_string())),
        )
            .into_response(),
        ChatError::Processing(message) => {
            tracing::error!(error = %message, "chat request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(message)),
            )
                .into_response()
        }
    }
}
