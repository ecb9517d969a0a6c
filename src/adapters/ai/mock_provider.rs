//! Mock AI Provider for testing.
//!
//! Provides a configurable mock implementation of the AIProvider port,
//! allowing tests to run without calling a real model.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Error injection
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response(r#"{"intent": "add_todo", "task": "buy milk"}"#)
//!     .with_error(AIError::RateLimited);
//!
//! let response = provider.complete(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse};

const MOCK_MODEL: &str = "mock-model-1";

/// Mock AI provider for testing.
#[derive(Debug, Clone, Default)]
pub struct MockAIProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<Result<String, AIError>>>>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockAIProvider {
    /// Creates a new mock provider with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        guard(&self.responses).push_back(Ok(content.into()));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: AIError) -> Self {
        guard(&self.responses).push_back(Err(error));
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        guard(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        guard(&self.calls).clone()
    }

    /// Gets the next scripted result, or a canned reply once the script runs out.
    fn next_response(&self) -> Result<String, AIError> {
        guard(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Ok("Mock response".to_string()))
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        guard(&self.calls).push(request);

        self.next_response().map(|content| CompletionResponse {
            content,
            model: MOCK_MODEL.to_string(),
        })
    }
}
