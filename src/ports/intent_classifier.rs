//! Intent classifier port.
//!
//! Maps free text to an [`IntentData`] descriptor. Classification has no side
//! effects; implementations may still fail (e.g. the model is unreachable), in
//! which case the chat workflow reports an internal processing error.

use async_trait::async_trait;

use crate::domain::chat::IntentData;
use crate::ports::AIError;

#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classify the user's message.
    async fn classify(&self, text: &str) -> Result<IntentData, AIError>;
}
