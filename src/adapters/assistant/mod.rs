//! Assistant collaborators backed by an [`AIProvider`](crate::ports::AIProvider).
//!
//! Each collaborator absorbs provider failures into a fixed fallback so the
//! chat workflow always has something to store and show.

mod chat_responder;
mod draft_generator;
mod intent_classifier;

pub use chat_responder::{LlmChatResponder, REPLY_FALLBACK};
pub use draft_generator::{LlmDraftGenerator, DRAFT_FALLBACK};
pub use intent_classifier::LlmIntentClassifier;
