//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `chat` - Chat messages, intent descriptors, and the approval lifecycle

pub mod chat;
pub mod foundation;
