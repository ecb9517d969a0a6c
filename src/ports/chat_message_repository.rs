//! Chat message repository port.
//!
//! Defines the contract for persisting and retrieving chat messages.
//! Implementations handle the actual storage operations.
//!
//! # Design
//!
//! - **One document per message**: every operation touches whole records
//! - **Session-scoped reads and deletes**: history is always per session
//! - **Last write wins**: `update` does not check versions; callers guard
//!   state transitions before writing

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{MessageId, SessionId};

/// Upper bound on messages returned by one history read.
pub const HISTORY_LIMIT: usize = 1000;

/// Repository port for chat message persistence.
#[async_trait]
pub trait ChatMessageRepository: Send + Sync {
    /// Insert a new message.
    ///
    /// # Errors
    ///
    /// - `Database` on persistence failure (including a duplicate id)
    async fn save(&self, message: &ChatMessage) -> Result<(), RepositoryError>;

    /// Find a message by its id. Returns `None` if absent.
    async fn find_by_id(&self, id: &MessageId) -> Result<Option<ChatMessage>, RepositoryError>;

    /// Messages of one session in ascending timestamp order, at most `limit`.
    async fn find_by_session(
        &self,
        session_id: &SessionId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, RepositoryError>;

    /// Persist the approval fields (`approved`, `edited_data`, dispatch result)
    /// of an existing message. Immutable fields are never rewritten.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the message doesn't exist
    /// - `Database` on persistence failure
    async fn update(&self, message: &ChatMessage) -> Result<(), RepositoryError>;

    /// Delete every message of a session, returning how many were removed.
    async fn delete_by_session(&self, session_id: &SessionId) -> Result<u64, RepositoryError>;

    /// Round-trip to the backing store to prove it is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Errors from chat message storage.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Chat message not found: {0}")]
    NotFound(MessageId),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_message_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ChatMessageRepository) {}
    }

    #[test]
    fn history_limit_is_one_thousand() {
        assert_eq!(HISTORY_LIMIT, 1000);
    }
}
