//! Chat domain - messages, intents, and the approval state machine.

mod dispatch;
mod errors;
mod intent;
mod message;
mod status;

pub use dispatch::DispatchOutcome;
pub use errors::ChatError;
pub use intent::{
    AddTodo, CreateEvent, GeneralChat, IntentData, LinkedinPost, SendEmail, SetReminder,
    UnknownIntent, GENERAL_CHAT,
};
pub use message::ChatMessage;
pub use status::MessageStatus;
