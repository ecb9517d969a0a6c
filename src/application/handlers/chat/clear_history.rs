//! ClearHistoryHandler - Command handler deleting a session's messages.

use std::sync::Arc;

use crate::domain::chat::ChatError;
use crate::domain::foundation::SessionId;
use crate::ports::ChatMessageRepository;

/// Command to delete every message of a session.
#[derive(Debug, Clone)]
pub struct ClearHistoryCommand {
    pub session_id: String,
}

/// Result of clearing a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearHistoryResult {
    pub cleared: u64,
}

impl ClearHistoryResult {
    pub fn status_message(&self) -> String {
        format!("Cleared {} messages from chat history", self.cleared)
    }
}

/// Handler for clearing history. Unconditional; clearing an empty session
/// succeeds with a count of zero.
pub struct ClearHistoryHandler {
    repository: Arc<dyn ChatMessageRepository>,
}

impl ClearHistoryHandler {
    pub fn new(repository: Arc<dyn ChatMessageRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: ClearHistoryCommand) -> Result<ClearHistoryResult, ChatError> {
        let session_id = SessionId::new(cmd.session_id)?;
        let cleared = self.repository.delete_by_session(&session_id).await?;

        tracing::info!(session_id = %session_id, cleared, "chat history cleared");
        Ok(ClearHistoryResult { cleared })
    }
}
