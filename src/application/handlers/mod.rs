//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod chat;
pub mod system;

pub use chat::{
    ApproveActionCommand, ApproveActionHandler, ApproveActionResult, ClearHistoryCommand,
    ClearHistoryHandler, ClearHistoryResult, GetHistoryHandler, GetHistoryQuery,
    SendChatMessageCommand, SendChatMessageHandler, CANCELLED_MESSAGE,
};
pub use system::{CheckHealthHandler, HealthReport, Presence};
