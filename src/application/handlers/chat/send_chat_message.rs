//! SendChatMessageHandler - Classify, answer or draft, and persist one exchange.

use std::sync::Arc;

use crate::domain::chat::{ChatError, ChatMessage};
use crate::domain::foundation::{SessionId, UserId};
use crate::ports::{ChatMessageRepository, ChatResponder, DraftGenerator, IntentClassifier};

/// Command to handle an incoming chat message.
#[derive(Debug, Clone)]
pub struct SendChatMessageCommand {
    pub message: String,
    pub session_id: String,
    /// Falls back to the default user when absent or blank.
    pub user_id: Option<String>,
}

/// Handler for incoming chat messages.
///
/// `general_chat` is answered directly by the responder; any other intent is
/// turned into a draft and left pending approval.
pub struct SendChatMessageHandler {
    repository: Arc<dyn ChatMessageRepository>,
    classifier: Arc<dyn IntentClassifier>,
    drafter: Arc<dyn DraftGenerator>,
    responder: Arc<dyn ChatResponder>,
}

impl SendChatMessageHandler {
    pub fn new(
        repository: Arc<dyn ChatMessageRepository>,
        classifier: Arc<dyn IntentClassifier>,
        drafter: Arc<dyn DraftGenerator>,
        responder: Arc<dyn ChatResponder>,
    ) -> Self {
        Self {
            repository,
            classifier,
            drafter,
            responder,
        }
    }

    pub async fn handle(&self, cmd: SendChatMessageCommand) -> Result<ChatMessage, ChatError> {
        // 1. Validate input before touching any collaborator
        let session_id = SessionId::new(cmd.session_id)?;
        let user_id = match cmd.user_id.filter(|u| !u.trim().is_empty()) {
            Some(id) => UserId::new(id)?,
            None => UserId::default(),
        };
        if cmd.message.trim().is_empty() {
            return Err(ChatError::ValidationFailed {
                field: "message".to_string(),
                message: "message cannot be empty".to_string(),
            });
        }

        tracing::info!(session_id = %session_id, user_id = %user_id, "chat message received");

        // 2. Classify
        let intent = self.classifier.classify(&cmd.message).await?;
        tracing::info!(session_id = %session_id, intent = intent.name(), "intent detected");

        // 3. Answer or draft
        let response = if intent.is_general_chat() {
            self.responder.reply(&cmd.message).await?
        } else {
            let draft = self.drafter.draft(&intent).await?;
            tracing::debug!(session_id = %session_id, intent = intent.name(), "draft generated");
            draft
        };

        // 4. Persist
        let message = ChatMessage::new(session_id, user_id, cmd.message, response, intent)?;
        self.repository.save(&message).await?;

        tracing::info!(
            message_id = %message.id(),
            needs_approval = message.needs_approval(),
            "chat message stored"
        );

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryChatMessageRepository;
    use crate::application::handlers::chat::testing::{
        session, EchoDrafter, EchoResponder, FailingRepository, FixedClassifier,
    };
    use crate::domain::chat::{IntentData, MessageStatus};
    use crate::domain::foundation::DEFAULT_USER_ID;
    use crate::ports::AIError;
    use proptest::prelude::*;
    use serde_json::json;

    struct Fixture {
        repo: Arc<InMemoryChatMessageRepository>,
        drafter: Arc<EchoDrafter>,
        responder: Arc<EchoResponder>,
        handler: SendChatMessageHandler,
    }

    fn fixture(classifier: FixedClassifier) -> Fixture {
        let repo = Arc::new(InMemoryChatMessageRepository::new());
        let drafter = Arc::new(EchoDrafter::default());
        let responder = Arc::new(EchoResponder::default());
        let handler = SendChatMessageHandler::new(
            repo.clone(),
            Arc::new(classifier),
            drafter.clone(),
            responder.clone(),
        );
        Fixture {
            repo,
            drafter,
            responder,
            handler,
        }
    }

    fn command(message: &str) -> SendChatMessageCommand {
        SendChatMessageCommand {
            message: message.to_string(),
            session_id: "s-1".to_string(),
            user_id: None,
        }
    }

    #[tokio::test]
    async fn general_chat_is_answered_by_responder() {
        let f = fixture(FixedClassifier::returning(json!({"intent": "general_chat"})));

        let message = f.handler.handle(command("hello")).await.unwrap();

        assert_eq!(message.response(), "REPLY hello");
        assert!(!message.needs_approval());
        assert_eq!(message.status(), MessageStatus::Answered);
        assert_eq!(f.responder.call_count(), 1);
        assert_eq!(f.drafter.call_count(), 0);
    }

    #[tokio::test]
    async fn other_intents_are_drafted_and_pending() {
        let descriptor = json!({"intent": "book_flight", "destination": "Paris"});
        let f = fixture(FixedClassifier::returning(descriptor.clone()));

        let message = f
            .handler
            .handle(command("book a flight to Paris"))
            .await
            .unwrap();

        let intent = IntentData::from_value(descriptor).unwrap();
        assert!(message.needs_approval());
        assert_eq!(message.response(), EchoDrafter::expected(&intent));
        assert_eq!(message.intent_data(), &intent);
        assert_eq!(message.approved(), None);
        assert_eq!(f.responder.call_count(), 0);
    }

    #[tokio::test]
    async fn persists_exactly_one_record() {
        let f = fixture(FixedClassifier::returning(json!({"intent": "general_chat"})));

        let message = f.handler.handle(command("hello")).await.unwrap();

        assert_eq!(f.repo.len().await, 1);
        let stored = f.repo.find_by_id(&message.id()).await.unwrap().unwrap();
        assert_eq!(stored, message);
    }

    #[tokio::test]
    async fn timestamps_do_not_decrease_within_session() {
        let f = fixture(FixedClassifier::returning(json!({"intent": "general_chat"})));

        let first = f.handler.handle(command("one")).await.unwrap();
        let second = f.handler.handle(command("two")).await.unwrap();

        assert!(!second.timestamp().is_before(&first.timestamp()));
    }

    #[tokio::test]
    async fn defaults_user_id() {
        let f = fixture(FixedClassifier::returning(json!({"intent": "general_chat"})));
        let mut cmd = command("hello");
        cmd.user_id = Some("   ".to_string());

        let message = f.handler.handle(cmd).await.unwrap();

        assert_eq!(message.user_id().as_str(), DEFAULT_USER_ID);
    }

    #[tokio::test]
    async fn keeps_supplied_user_id() {
        let f = fixture(FixedClassifier::returning(json!({"intent": "general_chat"})));
        let mut cmd = command("hello");
        cmd.user_id = Some("alice".to_string());

        let message = f.handler.handle(cmd).await.unwrap();

        assert_eq!(message.user_id().as_str(), "alice");
    }

    #[tokio::test]
    async fn rejects_blank_message_without_classifying() {
        let f = fixture(FixedClassifier::failing(AIError::RateLimited));

        let result = f.handler.handle(command("  ")).await;

        assert!(matches!(result, Err(ChatError::ValidationFailed { ref field, .. }) if field == "message"));
        assert!(f.repo.is_empty().await);
    }

    #[tokio::test]
    async fn rejects_blank_session() {
        let f = fixture(FixedClassifier::returning(json!({"intent": "general_chat"})));
        let mut cmd = command("hello");
        cmd.session_id = String::new();

        let result = f.handler.handle(cmd).await;

        assert!(matches!(result, Err(ChatError::ValidationFailed { ref field, .. }) if field == "session_id"));
    }

    #[tokio::test]
    async fn classifier_failure_is_processing_error() {
        let f = fixture(FixedClassifier::failing(AIError::unavailable("groq down")));

        let result = f.handler.handle(command("hello")).await;

        assert!(matches!(result, Err(ChatError::Processing(ref msg)) if msg.contains("groq down")));
        assert!(f.repo.is_empty().await);
    }

    #[tokio::test]
    async fn storage_failure_is_processing_error() {
        let handler = SendChatMessageHandler::new(
            Arc::new(FailingRepository),
            Arc::new(FixedClassifier::returning(json!({"intent": "general_chat"}))),
            Arc::new(EchoDrafter::default()),
            Arc::new(EchoResponder::default()),
        );

        let result = handler.handle(command("hello")).await;

        assert!(matches!(result, Err(ChatError::Processing(ref msg)) if msg.contains("connection refused")));
    }

    #[tokio::test]
    async fn history_reflects_session() {
        let f = fixture(FixedClassifier::returning(json!({"intent": "general_chat"})));

        f.handler.handle(command("hello")).await.unwrap();

        let history = f.repo.find_by_session(&session("s-1"), 10).await.unwrap();
        assert_eq!(history.len(), 1);
    }

    fn intent_name() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("general_chat".to_string()),
            Just("send_email".to_string()),
            Just("add_todo".to_string()),
            "[a-z_]{1,16}",
        ]
    }

    proptest! {
        #[test]
        fn needs_approval_iff_not_general_chat(name in intent_name()) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let f = fixture(FixedClassifier::returning(json!({"intent": name.clone()})));

            let message = rt.block_on(f.handler.handle(command("anything"))).unwrap();

            prop_assert_eq!(message.needs_approval(), name != "general_chat");
            if name == "general_chat" {
                prop_assert_eq!(message.response(), "REPLY anything");
            } else {
                prop_assert!(message.response().starts_with("DRAFT "));
            }
        }
    }
}
