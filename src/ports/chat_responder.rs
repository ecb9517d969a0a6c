//! General-chat responder port.

use async_trait::async_trait;

use crate::ports::AIError;

/// Produces a conversational reply when no actionable intent was detected.
#[async_trait]
pub trait ChatResponder: Send + Sync {
    async fn reply(&self, text: &str) -> Result<String, AIError>;
}
