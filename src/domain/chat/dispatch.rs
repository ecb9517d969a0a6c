//! Outcome of forwarding an approved action.

use serde_json::Value;

/// Result descriptor returned by the action dispatcher.
///
/// Both variants are a completed dispatch from the caller's point of view;
/// `RemoteFailure` means the automation endpoint answered but reported
/// `success: false`. Transport failures never produce a `DispatchOutcome`.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Delivered(Value),
    RemoteFailure(Value),
}

impl DispatchOutcome {
    /// Classifies a raw result payload by its boolean `success` key.
    ///
    /// A missing or non-boolean `success` counts as a remote failure.
    pub fn from_payload(payload: Value) -> Self {
        if payload.get("success").and_then(Value::as_bool) == Some(true) {
            DispatchOutcome::Delivered(payload)
        } else {
            DispatchOutcome::RemoteFailure(payload)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Delivered(_))
    }

    /// The raw payload, as persisted on the message.
    pub fn payload(&self) -> &Value {
        match self {
            DispatchOutcome::Delivered(payload) | DispatchOutcome::RemoteFailure(payload) => {
                payload
            }
        }
    }

    pub fn into_payload(self) -> Value {
        match self {
            DispatchOutcome::Delivered(payload) | DispatchOutcome::RemoteFailure(payload) => {
                payload
            }
        }
    }

    /// User-facing status line for the approval response.
    pub fn status_message(&self) -> &'static str {
        match self {
            DispatchOutcome::Delivered(_) => "Action executed successfully!",
            DispatchOutcome::RemoteFailure(_) => "Action sent but n8n had issues",
        }
    }
}
