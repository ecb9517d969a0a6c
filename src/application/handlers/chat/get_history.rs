//! GetHistoryHandler - Query handler for a session's chat history.

use std::sync::Arc;

use crate::domain::chat::{ChatError, ChatMessage};
use crate::domain::foundation::SessionId;
use crate::ports::{ChatMessageRepository, HISTORY_LIMIT};

/// Query for one session's messages.
#[derive(Debug, Clone)]
pub struct GetHistoryQuery {
    pub session_id: String,
}

/// Handler returning a session's messages, oldest first, capped at
/// [`HISTORY_LIMIT`].
pub struct GetHistoryHandler {
    repository: Arc<dyn ChatMessageRepository>,
}

impl GetHistoryHandler {
    pub fn new(repository: Arc<dyn ChatMessageRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetHistoryQuery) -> Result<Vec<ChatMessage>, ChatError> {
        let session_id = SessionId::new(query.session_id)?;
        let messages = self
            .repository
            .find_by_session(&session_id, HISTORY_LIMIT)
            .await?;

        tracing::debug!(session_id = %session_id, count = messages.len(), "history loaded");
        Ok(messages)
    }
}
