//! Draft generator port.

use async_trait::async_trait;

use crate::domain::chat::IntentData;
use crate::ports::AIError;

/// Turns an actionable intent into a human-readable preview for approval.
#[async_trait]
pub trait DraftGenerator: Send + Sync {
    async fn draft(&self, intent: &IntentData) -> Result<String, AIError>;
}
