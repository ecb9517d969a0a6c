//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - LLM completion providers (Groq over the OpenAI wire format, mock)
//! - `assistant` - Classifier, drafter and responder built on an AI provider
//! - `webhook` - n8n automation dispatch
//! - `postgres` - Durable message store
//! - `storage` - In-process message store
//! - `http` - REST API

pub mod ai;
pub mod assistant;
pub mod http;
pub mod postgres;
pub mod storage;
pub mod webhook;
