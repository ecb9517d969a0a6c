//! LLM-backed IntentClassifier implementation.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::chat::IntentData;
use crate::ports::{AIError, AIProvider, CompletionRequest, IntentClassifier, MessageRole};

const CLASSIFIER_PROMPT: &str = r#"You are an AI assistant that detects user intent and extracts structured JSON for different tasks.

You can detect the following intents:
1. send_email
2. create_event
3. add_todo
4. set_reminder
5. linkedin_post
6. general_chat

IMPORTANT: For all intents except general_chat, you must populate ALL fields with realistic content based on the user's request. DO NOT leave fields empty unless absolutely no information can be inferred.

Return only valid JSON based on the examples below.

---- Examples ----

send_email - ALWAYS populate recipient_name, subject, and body:
{
  "intent": "send_email",
  "recipient_name": "John Smith",
  "recipient_email": "john.smith@company.com",
  "subject": "Project Status Update",
  "body": "Hi John,\n\nI wanted to provide you with an update on the current project status. We're on track to meet our deadline.\n\nBest regards"
}

create_event - ALWAYS populate event_title, date, time:
{
  "intent": "create_event",
  "event_title": "Team Meeting",
  "date": "2024-01-15",
  "time": "10:00 AM",
  "participants": ["team@company.com", "manager@company.com"],
  "location": "Conference Room A"
}

add_todo - ALWAYS populate task:
{
  "intent": "add_todo",
  "task": "Complete quarterly report and submit to management",
  "due_date": "2024-01-20"
}

set_reminder - ALWAYS populate reminder_text:
{
  "intent": "set_reminder",
  "reminder_text": "Call client about contract renewal",
  "reminder_time": "2:00 PM",
  "reminder_date": "tomorrow"
}

linkedin_post - ALWAYS populate topic and post_content:
{
  "intent": "linkedin_post",
  "topic": "Artificial Intelligence in Business",
  "category": "Technology",
  "post_content": "Excited to share insights on how AI is transforming business operations. #AI #Technology"
}

general_chat:
{
  "intent": "general_chat",
  "message": "original user message"
}

RULES:
- If user mentions a specific person's name, use it for recipient_name
- If no email is mentioned, leave recipient_email empty but fill other fields
- Generate realistic, professional content for email body, event details, etc.
- Infer reasonable dates/times if not specified (e.g., "tomorrow", "next week", "2:00 PM")
- For participants, include relevant stakeholders based on context"#;

/// Classifies messages by asking the model for a JSON descriptor.
///
/// Never fails: anything short of a usable descriptor degrades to
/// `general_chat` carrying the original text and, where there was one, the
/// reason in its `error` slot.
pub struct LlmIntentClassifier {
    ai_provider: Arc<dyn AIProvider>,
}

impl LlmIntentClassifier {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }

    fn interpret(text: &str, content: &str) -> IntentData {
        let Some(candidate) = extract_json_object(content) else {
            tracing::debug!("no JSON object in classifier output, treating as general chat");
            return IntentData::general_chat(text);
        };

        let value = match serde_json::from_str::<Value>(candidate) {
            Ok(value) => value,
            Err(first_err) => {
                tracing::warn!(error = %first_err, "classifier returned malformed JSON, sanitising");
                match serde_json::from_str::<Value>(&escape_control_chars(candidate)) {
                    Ok(value) => value,
                    Err(_) => {
                        return IntentData::general_chat_with_error(
                            text,
                            format!("JSON parsing failed: {}", first_err),
                        )
                    }
                }
            }
        };

        IntentData::from_value(value).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "classifier JSON is not an intent descriptor");
            IntentData::general_chat_with_error(text, err.to_string())
        })
    }
}

#[async_trait]
impl IntentClassifier for LlmIntentClassifier {
    async fn classify(&self, text: &str) -> Result<IntentData, AIError> {
        let request = CompletionRequest::new()
            .with_system_prompt(CLASSIFIER_PROMPT)
            .with_message(MessageRole::User, text)
            .with_temperature(0.0);

        match self.ai_provider.complete(request).await {
            Ok(response) => {
                tracing::debug!(content = %response.content, "classifier raw output");
                Ok(Self::interpret(text, &response.content))
            }
            Err(err) => {
                tracing::error!(error = %err, "intent detection failed");
                Ok(IntentData::general_chat_with_error(text, err.to_string()))
            }
        }
    }
}

/// Slice from the first `{` to the last `}`, if both exist in that order.
fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

/// Escapes raw control characters that appear inside JSON string literals.
///
/// Models often emit literal newlines inside `"body"` values; structural
/// whitespace between tokens is left alone.
fn escape_control_chars(json: &str) -> String {
    let mut out = String::with_capacity(json.len() + 16);
    let mut in_string = false;
    let mut escaped = false;

    for c in json.chars() {
        if !in_string {
            if c == '"' {
                in_string = true;
            }
            out.push(c);
            continue;
        }

        if escaped {
            escaped = false;
            out.push(c);
            continue;
        }

        match c {
            '\\' => {
                escaped = true;
                out.push(c);
            }
            '"' => {
                in_string = false;
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }

    out
}
