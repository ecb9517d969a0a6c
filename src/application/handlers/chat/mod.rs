//! Chat workflow command and query handlers.

mod approve_action;
mod clear_history;
mod get_history;
mod send_chat_message;

#[cfg(test)]
pub(crate) mod testing;

pub use approve_action::{
    ApproveActionCommand, ApproveActionHandler, ApproveActionResult, CANCELLED_MESSAGE,
};
pub use clear_history::{ClearHistoryCommand, ClearHistoryHandler, ClearHistoryResult};
pub use get_history::{GetHistoryHandler, GetHistoryQuery};
pub use send_chat_message::{SendChatMessageCommand, SendChatMessageHandler};

use crate::domain::chat::ChatError;
use crate::ports::{AIError, DispatchError, RepositoryError};

impl From<RepositoryError> for ChatError {
    fn from(err: RepositoryError) -> Self {
        ChatError::processing(err)
    }
}

impl From<AIError> for ChatError {
    fn from(err: AIError) -> Self {
        ChatError::processing(err)
    }
}

impl From<DispatchError> for ChatError {
    fn from(err: DispatchError) -> Self {
        ChatError::processing(err)
    }
}
