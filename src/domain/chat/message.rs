//! Chat message entity.
//!
//! One record per chat request. The user's text, the system response, the
//! classified intent and the creation time never change; the approval step
//! later fills in the decision, any edited descriptor, and the dispatch result.

use serde_json::Value;

use super::{DispatchOutcome, IntentData, MessageStatus};
use crate::domain::foundation::{
    MessageId, SessionId, StateMachine, Timestamp, UserId, ValidationError,
};

/// A persisted chat exchange.
///
/// # Invariants
///
/// - `id` is unique and immutable
/// - `message` is non-empty
/// - `approved` stays `None` until a decision is recorded
/// - `dispatch_result` is present only on approved messages
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    id: MessageId,
    session_id: SessionId,
    user_id: UserId,
    message: String,
    response: String,
    intent_data: IntentData,
    approved: Option<bool>,
    edited_data: Option<IntentData>,
    dispatch_result: Option<Value>,
    timestamp: Timestamp,
}

impl ChatMessage {
    /// Creates a new message stamped with the current time.
    pub fn new(
        session_id: SessionId,
        user_id: UserId,
        message: impl Into<String>,
        response: impl Into<String>,
        intent_data: IntentData,
    ) -> Result<Self, ValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ValidationError::empty_field("message"));
        }

        Ok(Self {
            id: MessageId::new(),
            session_id,
            user_id,
            message,
            response: response.into(),
            intent_data,
            approved: None,
            edited_data: None,
            dispatch_result: None,
            timestamp: Timestamp::now(),
        })
    }

    /// Rebuilds a message from storage without validation.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: MessageId,
        session_id: SessionId,
        user_id: UserId,
        message: String,
        response: String,
        intent_data: IntentData,
        approved: Option<bool>,
        edited_data: Option<IntentData>,
        dispatch_result: Option<Value>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            user_id,
            message,
            response,
            intent_data,
            approved,
            edited_data,
            dispatch_result,
            timestamp,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn intent_data(&self) -> &IntentData {
        &self.intent_data
    }

    pub fn approved(&self) -> Option<bool> {
        self.approved
    }

    pub fn edited_data(&self) -> Option<&IntentData> {
        self.edited_data.as_ref()
    }

    pub fn dispatch_result(&self) -> Option<&Value> {
        self.dispatch_result.as_ref()
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// True when the response is a draft that must be approved before dispatch.
    pub fn needs_approval(&self) -> bool {
        !self.intent_data.is_general_chat()
    }

    pub fn status(&self) -> MessageStatus {
        MessageStatus::derive(self.needs_approval(), self.approved)
    }

    /// Checks that a decision can be recorded, without changing anything.
    pub fn ensure_accepts_decision(&self, approve: bool) -> Result<(), ValidationError> {
        let target = if approve {
            MessageStatus::Approved
        } else {
            MessageStatus::Rejected
        };
        self.status().transition_to(target).map(|_| ())
    }

    /// Data to dispatch: the caller's edit if given, else the classified intent.
    pub fn action_data<'a>(&'a self, edited: Option<&'a IntentData>) -> &'a IntentData {
        edited.unwrap_or(&self.intent_data)
    }

    /// Records a rejection.
    pub fn reject(&mut self) -> Result<(), ValidationError> {
        self.ensure_accepts_decision(false)?;
        self.approved = Some(false);
        Ok(())
    }

    /// Records an approval together with what was dispatched and what came back.
    pub fn approve(
        &mut self,
        edited_data: Option<IntentData>,
        outcome: &DispatchOutcome,
    ) -> Result<(), ValidationError> {
        self.ensure_accepts_decision(true)?;
        self.approved = Some(true);
        self.edited_data = edited_data;
        self.dispatch_result = Some(outcome.payload().clone());
        Ok(())
    }
}
