//! In-Memory Chat Message Repository
//!
//! Keeps chat messages in a process-local map. Used when no database URL is
//! configured, and by tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{MessageId, SessionId};
use crate::ports::{ChatMessageRepository, RepositoryError};

#[derive(Debug, Default)]
struct Inner {
    messages: HashMap<MessageId, (u64, ChatMessage)>,
    next_seq: u64,
}

/// In-memory storage for chat messages
#[derive(Debug, Clone, Default)]
pub struct InMemoryChatMessageRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryChatMessageRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored messages across all sessions
    pub async fn len(&self) -> usize {
        self.inner.read().await.messages.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ChatMessageRepository for InMemoryChatMessageRepository {
    async fn save(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        if inner.messages.contains_key(&message.id()) {
            return Err(RepositoryError::Database(format!(
                "duplicate chat message id {}",
                message.id()
            )));
        }
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.messages.insert(message.id(), (seq, message.clone()));
        Ok(())
    }

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<ChatMessage>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.messages.get(id).map(|(_, message)| message.clone()))
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let inner = self.inner.read().await;
        let mut matching: Vec<&(u64, ChatMessage)> = inner
            .messages
            .values()
            .filter(|(_, message)| message.session_id() == session_id)
            .collect();

        matching.sort_by(|(seq_a, a), (seq_b, b)| {
            a.timestamp()
                .as_datetime()
                .cmp(b.timestamp().as_datetime())
                .then(seq_a.cmp(seq_b))
        });

        Ok(matching
            .into_iter()
            .take(limit)
            .map(|(_, message)| message.clone())
            .collect())
    }

    async fn update(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        let (_, stored) = inner
            .messages
            .get_mut(&message.id())
            .ok_or(RepositoryError::NotFound(message.id()))?;

        *stored = ChatMessage::reconstitute(
            stored.id(),
            stored.session_id().clone(),
            stored.user_id().clone(),
            stored.message().to_string(),
            stored.response().to_string(),
            stored.intent_data().clone(),
            message.approved(),
            message.edited_data().cloned(),
            message.dispatch_result().cloned(),
            stored.timestamp(),
        );
        Ok(())
    }

    async fn delete_by_session(&self, session_id: &SessionId) -> Result<u64, RepositoryError> {
        let mut inner = self.inner.write().await;
        let before = inner.messages.len();
        inner
            .messages
            .retain(|_, (_, message)| message.session_id() != session_id);
        Ok((before - inner.messages.len()) as u64)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::{DispatchOutcome, IntentData, MessageStatus};
    use crate::domain::foundation::UserId;
    use serde_json::json;

    fn session(id: &str) -> SessionId {
        SessionId::new(id).unwrap()
    }

    fn chat(session_id: &str, text: &str) -> ChatMessage {
        ChatMessage::new(
            session(session_id),
            UserId::default(),
            text,
            format!("reply to {}", text),
            IntentData::general_chat(text),
        )
        .unwrap()
    }

    fn todo(session_id: &str) -> ChatMessage {
        ChatMessage::new(
            session(session_id),
            UserId::default(),
            "add buy milk",
            "📝 Add: buy milk",
            IntentData::from_value(json!({"intent": "add_todo", "task": "buy milk"})).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_and_find_by_id() {
        let repo = InMemoryChatMessageRepository::new();
        let message = chat("s", "hello");

        repo.save(&message).await.unwrap();

        assert_eq!(repo.find_by_id(&message.id()).await.unwrap(), Some(message));
        assert_eq!(repo.find_by_id(&MessageId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_rejects_duplicate_id() {
        let repo = InMemoryChatMessageRepository::new();
        let message = chat("s", "hello");

        repo.save(&message).await.unwrap();

        assert!(matches!(
            repo.save(&message).await,
            Err(RepositoryError::Database(_))
        ));
    }

    #[tokio::test]
    async fn history_is_scoped_ordered_and_limited() {
        let repo = InMemoryChatMessageRepository::new();
        for text in ["one", "two", "three"] {
            repo.save(&chat("a", text)).await.unwrap();
        }
        repo.save(&chat("b", "other")).await.unwrap();

        let all = repo.find_by_session(&session("a"), 1000).await.unwrap();
        let texts: Vec<&str> = all.iter().map(|m| m.message()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);

        let limited = repo.find_by_session(&session("a"), 2).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].message(), "one");

        assert!(repo
            .find_by_session(&session("missing"), 1000)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn update_persists_only_approval_fields() {
        let repo = InMemoryChatMessageRepository::new();
        let mut message = todo("s");
        repo.save(&message).await.unwrap();

        message
            .approve(None, &DispatchOutcome::from_payload(json!({"success": true})))
            .unwrap();
        repo.update(&message).await.unwrap();

        let stored = repo.find_by_id(&message.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), MessageStatus::Approved);
        assert_eq!(stored.dispatch_result(), Some(&json!({"success": true})));
        assert_eq!(stored.response(), "📝 Add: buy milk");
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let repo = InMemoryChatMessageRepository::new();
        let message = todo("s");

        assert!(matches!(
            repo.update(&message).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_by_session_counts_and_isolates() {
        let repo = InMemoryChatMessageRepository::new();
        repo.save(&chat("a", "one")).await.unwrap();
        repo.save(&chat("a", "two")).await.unwrap();
        repo.save(&chat("b", "keep")).await.unwrap();

        assert_eq!(repo.delete_by_session(&session("a")).await.unwrap(), 2);
        assert_eq!(repo.delete_by_session(&session("a")).await.unwrap(), 0);
        assert_eq!(repo.len().await, 1);
        assert_eq!(
            repo.find_by_session(&session("b"), 10).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn ping_always_succeeds() {
        assert!(InMemoryChatMessageRepository::new().ping().await.is_ok());
    }
}
