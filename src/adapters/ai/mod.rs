//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `OpenAIProvider` - Any OpenAI-compatible chat-completions API (Groq in production)

mod mock_provider;
mod openai_provider;

pub use mock_provider::MockAIProvider;
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
