//! LLM-backed DraftGenerator implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::chat::IntentData;
use crate::ports::{AIError, AIProvider, CompletionRequest, DraftGenerator, MessageRole};

/// Returned when no draft could be produced.
pub const DRAFT_FALLBACK: &str = "⚠️ Could not generate a friendly message.";

const DRAFT_PROMPT: &str = r#"You are a friendly assistant that converts structured intent data into human-friendly messages.

Respond based on intent type:

- send_email → Draft a friendly email
- linkedin_post → Draft a professional LinkedIn post
- create_event / add_todo / set_reminder → Summarize task or reminder
- general_chat → Return the user message

Return plain text.

Examples:

Input: {"intent": "send_email", "recipient_name": "Priya", "subject": "AI Update", "body": "Here's the latest..."}
Output: ✉️ Here's a draft email to Priya:
Subject: AI Update
Body: Here's the latest...

Input: {"intent": "set_reminder", "reminder_text": "Meeting with HR", "reminder_time": "10 AM", "reminder_date": "tomorrow"}
Output: ⏰ I'll remind you about "Meeting with HR" at 10 AM tomorrow."#;

/// Turns an intent descriptor into the preview shown for approval.
pub struct LlmDraftGenerator {
    ai_provider: Arc<dyn AIProvider>,
}

impl LlmDraftGenerator {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }
}

#[async_trait]
impl DraftGenerator for LlmDraftGenerator {
    async fn draft(&self, intent: &IntentData) -> Result<String, AIError> {
        let input_json = match intent.to_value() {
            Ok(value) => value.to_string(),
            Err(err) => {
                tracing::error!(error = %err, intent = intent.name(), "failed to encode intent for drafting");
                return Ok(DRAFT_FALLBACK.to_string());
            }
        };

        let request = CompletionRequest::new()
            .with_system_prompt(DRAFT_PROMPT)
            .with_message(MessageRole::User, input_json)
            .with_temperature(0.0);

        match self.ai_provider.complete(request).await {
            Ok(response) => Ok(response.content),
            Err(err) => {
                tracing::error!(error = %err, intent = intent.name(), "draft generation failed");
                Ok(DRAFT_FALLBACK.to_string())
            }
        }
    }
}
