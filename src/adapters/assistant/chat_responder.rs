//! LLM-backed ChatResponder implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::ports::{AIError, AIProvider, ChatResponder, CompletionRequest, MessageRole};

/// Returned when the model could not be reached.
pub const REPLY_FALLBACK: &str = "🤖 Sorry, I couldn't answer that.";

const PERSONA_PROMPT: &str = "You are Elva AI – a friendly and helpful assistant.";

/// Answers conversational messages in the assistant's persona.
pub struct LlmChatResponder {
    ai_provider: Arc<dyn AIProvider>,
}

impl LlmChatResponder {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }
}

#[async_trait]
impl ChatResponder for LlmChatResponder {
    async fn reply(&self, text: &str) -> Result<String, AIError> {
        let request = CompletionRequest::new()
            .with_system_prompt(PERSONA_PROMPT)
            .with_message(MessageRole::User, text)
            .with_temperature(0.0);

        match self.ai_provider.complete(request).await {
            Ok(response) => Ok(response.content),
            Err(err) => {
                tracing::warn!(error = %err, "general chat reply failed");
                Ok(REPLY_FALLBACK.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;

    #[tokio::test]
    async fn replies_with_persona() {
        let provider = MockAIProvider::new().with_response("Hi there!");
        let responder = LlmChatResponder::new(Arc::new(provider.clone()));

        let reply = responder.reply("hello").await.unwrap();

        assert_eq!(reply, "Hi there!");
        let calls = provider.get_calls();
        assert_eq!(calls[0].system_prompt.as_deref(), Some(PERSONA_PROMPT));
        assert_eq!(calls[0].messages[0].content, "hello");
    }

    #[tokio::test]
    async fn provider_failure_returns_fallback() {
        let provider = MockAIProvider::new().with_error(AIError::RateLimited);
        let responder = LlmChatResponder::new(Arc::new(provider));

        assert_eq!(responder.reply("hello").await.unwrap(), REPLY_FALLBACK);
    }
}
