//! HTTP DTOs for chat endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::handlers::chat::{ApproveActionResult, ClearHistoryResult};
use crate::domain::chat::{ChatMessage, IntentData};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request carrying one user chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Request recording an approval decision.
#[derive(Debug, Clone, Deserialize)]
pub struct ApproveRequest {
    pub session_id: String,
    pub message_id: String,
    pub approved: bool,
    #[serde(default)]
    pub edited_data: Option<Value>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response to a chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub id: String,
    pub message: String,
    pub response: String,
    pub intent_data: IntentData,
    pub needs_approval: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<&ChatMessage> for ChatResponse {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id().to_string(),
            message: message.message().to_string(),
            response: message.response().to_string(),
            intent_data: message.intent_data().clone(),
            needs_approval: message.needs_approval(),
            timestamp: *message.timestamp().as_datetime(),
        }
    }
}

/// Response to an approval decision.
#[derive(Debug, Clone, Serialize)]
pub struct ApproveResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n8n_response: Option<Value>,
}

impl From<ApproveActionResult> for ApproveResponse {
    fn from(result: ApproveActionResult) -> Self {
        Self {
            success: true,
            message: result.message.to_string(),
            n8n_response: result.outcome.map(|o| o.into_payload()),
        }
    }
}

/// One stored message as returned by the history endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryMessage {
    pub id: String,
    pub session_id: String,
    pub user_id: String,
    pub message: String,
    pub response: String,
    pub intent_data: IntentData,
    pub approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_data: Option<IntentData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n8n_response: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

impl From<&ChatMessage> for HistoryMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id().to_string(),
            session_id: message.session_id().to_string(),
            user_id: message.user_id().to_string(),
            message: message.message().to_string(),
            response: message.response().to_string(),
            intent_data: message.intent_data().clone(),
            approved: message.approved(),
            edited_data: message.edited_data().cloned(),
            n8n_response: message.dispatch_result().cloned(),
            timestamp: *message.timestamp().as_datetime(),
        }
    }
}

/// A session's history.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<HistoryMessage>,
}

impl From<Vec<ChatMessage>> for HistoryResponse {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages: messages.iter().map(HistoryMessage::from).collect(),
        }
    }
}

/// Response to clearing a session.
#[derive(Debug, Clone, Serialize)]
pub struct ClearHistoryResponse {
    pub success: bool,
    pub message: String,
    pub cleared: u64,
}

impl From<ClearHistoryResult> for ClearHistoryResponse {
    fn from(result: ClearHistoryResult) -> Self {
        Self {
            success: true,
            message: result.status_message(),
            cleared: result.cleared,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self {
            code: "SERVICE_UNAVAILABLE".to_string(),
            message: message.into(),
        }
    }

    pub fn request_timeout(message: impl Into<String>) -> Self {
        Self {
            code: "REQUEST_TIMEOUT".to_string(),
            message: message.into(),
        }
    }
}
