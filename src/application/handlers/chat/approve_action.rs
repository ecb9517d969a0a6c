//! ApproveActionHandler - Record a decision on a drafted action and dispatch it.

use serde_json::Value;
use std::sync::Arc;

use crate::domain::chat::{ChatError, DispatchOutcome, IntentData};
use crate::domain::foundation::{MessageId, SessionId};
use crate::ports::{ActionDispatcher, ChatMessageRepository};

/// Status line returned when the user declines an action.
pub const CANCELLED_MESSAGE: &str = "Action cancelled";

/// Command to approve or reject a pending action.
#[derive(Debug, Clone)]
pub struct ApproveActionCommand {
    pub session_id: String,
    /// Id as supplied by the caller; a malformed id is reported as not found.
    pub message_id: String,
    pub approved: bool,
    /// Replacement descriptor to dispatch instead of the classified one.
    pub edited_data: Option<Value>,
}

/// Result of a recorded decision.
#[derive(Debug, Clone, PartialEq)]
pub struct ApproveActionResult {
    pub message: &'static str,
    /// Present only when the action was approved and dispatched.
    pub outcome: Option<DispatchOutcome>,
}

/// Handler for approval decisions.
///
/// Dispatch always uses the user and session stored on the message, never the
/// ones in the request. The pending-state check and the write are separate
/// store operations, so two concurrent approvals of one message can both
/// dispatch; the later write wins. Dispatch and the follow-up write run on a
/// spawned task and complete even if the caller stops waiting.
pub struct ApproveActionHandler {
    repository: Arc<dyn ChatMessageRepository>,
    dispatcher: Arc<dyn ActionDispatcher>,
}

impl ApproveActionHandler {
    pub fn new(
        repository: Arc<dyn ChatMessageRepository>,
        dispatcher: Arc<dyn ActionDispatcher>,
    ) -> Self {
        Self {
            repository,
            dispatcher,
        }
    }

    pub async fn handle(&self, cmd: ApproveActionCommand) -> Result<ApproveActionResult, ChatError> {
        let session_id = SessionId::new(cmd.session_id)?;

        // 1. Load, treating an unparseable id as a missing message
        let message_id: MessageId = cmd
            .message_id
            .parse()
            .map_err(|_| ChatError::MessageNotFound(cmd.message_id.clone()))?;
        let mut message = self
            .repository
            .find_by_id(&message_id)
            .await?
            .ok_or_else(|| ChatError::MessageNotFound(cmd.message_id.clone()))?;

        if message.session_id() != &session_id {
            tracing::warn!(
                message_id = %message_id,
                requested_session = %session_id,
                stored_session = %message.session_id(),
                "approval names a different session than the stored message"
            );
        }

        // 2. Guard the single decision
        message
            .ensure_accepts_decision(cmd.approved)
            .map_err(|_| ChatError::AlreadyDecided {
                id: message_id,
                status: message.status(),
            })?;

        // 3a. Rejection: record and stop; any edit is ignored
        if !cmd.approved {
            message.reject()?;
            self.repository.update(&message).await?;
            tracing::info!(message_id = %message_id, "action rejected");
            return Ok(ApproveActionResult {
                message: CANCELLED_MESSAGE,
                outcome: None,
            });
        }

        // 3b. Approval: dispatch, then record what was sent and what came back
        let edited_data = cmd.edited_data.map(IntentData::from_value).transpose()?;
        let final_data = message.action_data(edited_data.as_ref()).clone();
        tracing::info!(
            message_id = %message_id,
            intent = final_data.name(),
            edited = edited_data.is_some(),
            "dispatching approved action"
        );

        // Detached so a dropped request cannot leave a dispatched action unrecorded.
        let repository = Arc::clone(&self.repository);
        let dispatcher = Arc::clone(&self.dispatcher);
        let recording = tokio::spawn(async move {
            let outcome = dispatcher
                .dispatch(&final_data, message.user_id(), message.session_id())
                .await
                .map_err(|e| {
                    tracing::error!(message_id = %message_id, error = %e, "dispatch failed");
                    ChatError::from(e)
                })?;

            message.approve(edited_data, &outcome)?;
            repository.update(&message).await?;

            tracing::info!(
                message_id = %message_id,
                delivered = outcome.is_success(),
                "approved action recorded"
            );
            Ok::<_, ChatError>(outcome)
        });

        let outcome = recording.await.map_err(ChatError::processing)??;

        Ok(ApproveActionResult {
            message: outcome.status_message(),
            outcome: Some(outcome),
        })
    }
}
