//! Chat workflow errors.

use thiserror::Error;

use super::MessageStatus;
use crate::domain::foundation::{MessageId, ValidationError};

/// Errors surfaced by the chat workflow handlers.
#[derive(Debug, Clone, Error)]
pub enum ChatError {
    #[error("Validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    /// The referenced message does not exist. Holds the id as supplied.
    #[error("Message not found")]
    MessageNotFound(String),

    #[error("Message {id} is {status} and cannot take an approval decision")]
    AlreadyDecided { id: MessageId, status: MessageStatus },

    /// Any collaborator or storage failure, carrying the raw error text.
    #[error("{0}")]
    Processing(String),
}

impl ChatError {
    pub fn processing(err: impl std::fmt::Display) -> Self {
        ChatError::Processing(err.to_string())
    }
}

impl From<ValidationError> for ChatError {
    fn from(err: ValidationError) -> Self {
        ChatError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
