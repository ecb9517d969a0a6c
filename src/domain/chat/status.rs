//! Lifecycle status of a chat message.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where a message sits in the approval workflow.
///
/// ```text
/// created ──general_chat──▶ Answered
///    │
///    └──other intent──▶ PendingApproval ──approve──▶ Approved
///                                       └──reject───▶ Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    /// Conversational reply; nothing to approve.
    Answered,
    /// Draft shown to the user, awaiting a decision.
    PendingApproval,
    /// Approved and forwarded to the automation webhook.
    Approved,
    /// Declined by the user; never dispatched.
    Rejected,
}

impl MessageStatus {
    /// Derives the status from what is persisted on the record.
    pub fn derive(needs_approval: bool, approved: Option<bool>) -> Self {
        match (needs_approval, approved) {
            (false, _) => MessageStatus::Answered,
            (true, None) => MessageStatus::PendingApproval,
            (true, Some(true)) => MessageStatus::Approved,
            (true, Some(false)) => MessageStatus::Rejected,
        }
    }
}

impl StateMachine for MessageStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MessageStatus::*;
        matches!(
            (self, target),
            (PendingApproval, Approved) | (PendingApproval, Rejected)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MessageStatus::*;
        match self {
            PendingApproval => vec![Approved, Rejected],
            Answered | Approved | Rejected => vec![],
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MessageStatus::Answered => "answered",
            MessageStatus::PendingApproval => "pending_approval",
            MessageStatus::Approved => "approved",
            MessageStatus::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}
