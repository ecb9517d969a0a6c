//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    ApproveActionCommand, ApproveActionHandler, ApproveActionResult, CheckHealthHandler,
    ClearHistoryCommand, ClearHistoryHandler, ClearHistoryResult, GetHistoryHandler,
    GetHistoryQuery, HealthReport, Presence, SendChatMessageCommand, SendChatMessageHandler,
    CANCELLED_MESSAGE,
};
