//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the chat workflow and the outside world. Adapters implement these ports.
//!
//! ## Storage
//!
//! - `ChatMessageRepository` - Chat message persistence
//!
//! ## Assistant collaborators
//!
//! - `AIProvider` - Chat-completion backend shared by the collaborators below
//! - `IntentClassifier` - Free text to intent descriptor
//! - `DraftGenerator` - Intent descriptor to approval preview
//! - `ChatResponder` - Free text to conversational reply
//!
//! ## Side effects
//!
//! - `ActionDispatcher` - Forwards approved actions to the automation webhook

mod action_dispatcher;
mod ai_provider;
mod chat_message_repository;
mod chat_responder;
mod draft_generator;
mod intent_classifier;

pub use action_dispatcher::{ActionDispatcher, DispatchError};
pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, Message, MessageRole,
};
pub use chat_message_repository::{ChatMessageRepository, RepositoryError, HISTORY_LIMIT};
pub use chat_responder::ChatResponder;
pub use draft_generator::DraftGenerator;
pub use intent_classifier::IntentClassifier;
