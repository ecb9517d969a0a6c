//! Hand-written collaborator mocks shared by the chat handler tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::chat::{ChatMessage, DispatchOutcome, IntentData};
use crate::domain::foundation::{MessageId, SessionId, UserId};
use crate::ports::{
    AIError, ActionDispatcher, ChatMessageRepository, ChatResponder, DispatchError,
    DraftGenerator, IntentClassifier, RepositoryError,
};

/// Classifier that always returns the same descriptor, or fails.
pub struct FixedClassifier {
    result: Result<IntentData, AIError>,
}

impl FixedClassifier {
    pub fn returning(value: Value) -> Self {
        Self {
            result: Ok(IntentData::from_value(value).unwrap()),
        }
    }

    pub fn failing(err: AIError) -> Self {
        Self { result: Err(err) }
    }
}

#[async_trait]
impl IntentClassifier for FixedClassifier {
    async fn classify(&self, _text: &str) -> Result<IntentData, AIError> {
        self.result.clone()
    }
}

/// Drafter producing `"DRAFT <intent json>"` and counting calls.
#[derive(Default)]
pub struct EchoDrafter {
    pub calls: AtomicUsize,
}

impl EchoDrafter {
    pub fn expected(intent: &IntentData) -> String {
        format!("DRAFT {}", intent.to_value().unwrap())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DraftGenerator for EchoDrafter {
    async fn draft(&self, intent: &IntentData) -> Result<String, AIError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::expected(intent))
    }
}

/// Responder producing `"REPLY <text>"` and counting calls.
#[derive(Default)]
pub struct EchoResponder {
    pub calls: AtomicUsize,
}

impl EchoResponder {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatResponder for EchoResponder {
    async fn reply(&self, text: &str) -> Result<String, AIError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("REPLY {}", text))
    }
}

/// Dispatcher recording every call and answering with a fixed result.
pub struct RecordingDispatcher {
    answer: Result<Value, DispatchError>,
    yield_first: bool,
    delay: Option<Duration>,
    calls: Mutex<Vec<(IntentData, UserId, SessionId)>>,
}

impl RecordingDispatcher {
    pub fn succeeding() -> Self {
        Self::answering(json!({"success": true, "status_code": 200}))
    }

    pub fn answering(payload: Value) -> Self {
        Self {
            answer: Ok(payload),
            yield_first: false,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: DispatchError) -> Self {
        Self {
            answer: Err(err),
            yield_first: false,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Suspends once inside every dispatch so concurrent callers interleave.
    pub fn yielding(mut self) -> Self {
        self.yield_first = true;
        self
    }

    /// Holds every dispatch open for `delay` before answering.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(IntentData, UserId, SessionId)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActionDispatcher for RecordingDispatcher {
    async fn dispatch(
        &self,
        action: &IntentData,
        user_id: &UserId,
        session_id: &SessionId,
    ) -> Result<DispatchOutcome, DispatchError> {
        self.calls
            .lock()
            .unwrap()
            .push((action.clone(), user_id.clone(), session_id.clone()));
        if self.yield_first {
            tokio::task::yield_now().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answer.clone().map(DispatchOutcome::from_payload)
    }
}

/// Repository whose every operation fails.
pub struct FailingRepository;

#[async_trait]
impl ChatMessageRepository for FailingRepository {
    async fn save(&self, _message: &ChatMessage) -> Result<(), RepositoryError> {
        Err(RepositoryError::Database("connection refused".to_string()))
    }

    async fn find_by_id(&self, _id: &MessageId) -> Result<Option<ChatMessage>, RepositoryError> {
        Err(RepositoryError::Database("connection refused".to_string()))
    }

    async fn find_by_session(
        &self,
        _session_id: &SessionId,
        _limit: usize,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        Err(RepositoryError::Database("connection refused".to_string()))
    }

    async fn update(&self, _message: &ChatMessage) -> Result<(), RepositoryError> {
        Err(RepositoryError::Database("connection refused".to_string()))
    }

    async fn delete_by_session(&self, _session_id: &SessionId) -> Result<u64, RepositoryError> {
        Err(RepositoryError::Database("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Err(RepositoryError::Database("connection refused".to_string()))
    }
}

pub fn session(id: &str) -> SessionId {
    SessionId::new(id).unwrap()
}

/// A stored message awaiting approval.
pub fn pending(session_id: &str, intent: Value) -> ChatMessage {
    let intent = IntentData::from_value(intent).unwrap();
    ChatMessage::new(
        session(session_id),
        UserId::new("u-1").unwrap(),
        "please do it",
        EchoDrafter::expected(&intent),
        intent,
    )
    .unwrap()
}
