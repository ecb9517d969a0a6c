//! Action dispatcher port.
//!
//! Forwards an approved action to the external automation system. This is the
//! only side-effecting collaborator of the chat workflow.
//!
//! # Failure model
//!
//! - The remote side answered but reported failure: `Ok(DispatchOutcome::RemoteFailure)`
//! - The call itself failed (connection, timeout, bad payload): `Err(DispatchError)`
//!
//! Only the second surfaces as an error to API callers.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::chat::{DispatchOutcome, IntentData};
use crate::domain::foundation::{SessionId, UserId};

#[async_trait]
pub trait ActionDispatcher: Send + Sync {
    /// Send `action` on behalf of `user_id` within `session_id`.
    async fn dispatch(
        &self,
        action: &IntentData,
        user_id: &UserId,
        session_id: &SessionId,
    ) -> Result<DispatchOutcome, DispatchError>;
}

/// Errors raised by the dispatch call itself.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    #[error("webhook request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("webhook transport error: {0}")]
    Transport(String),

    #[error("failed to encode webhook payload: {0}")]
    Encoding(String),
}
