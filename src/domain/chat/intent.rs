//! Intent descriptor produced by the classifier.
//!
//! On the wire an intent is a flat JSON object: an `"intent"` name plus slot
//! keys. Known intents get typed slots; anything else lands in
//! [`IntentData::Unknown`]. Slot keys a variant does not model are kept in its
//! `extra` map, so a descriptor always re-serializes to what the classifier sent.

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::domain::foundation::ValidationError;

/// Intent name for plain conversation that needs no action.
pub const GENERAL_CHAT: &str = "general_chat";

const SEND_EMAIL: &str = "send_email";
const CREATE_EVENT: &str = "create_event";
const ADD_TODO: &str = "add_todo";
const SET_REMINDER: &str = "set_reminder";
const LINKEDIN_POST: &str = "linkedin_post";

/// Classified intent with its extracted slots.
#[derive(Debug, Clone, PartialEq)]
pub enum IntentData {
    SendEmail(SendEmail),
    CreateEvent(CreateEvent),
    AddTodo(AddTodo),
    SetReminder(SetReminder),
    LinkedinPost(LinkedinPost),
    GeneralChat(GeneralChat),
    /// An intent name this service has no typed slots for.
    Unknown(UnknownIntent),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SendEmail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetReminder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkedinPost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralChat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Why classification fell back to general chat, if it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownIntent {
    pub intent: String,
    pub slots: Map<String, Value>,
}

impl IntentData {
    /// General chat carrying the user's original text.
    pub fn general_chat(message: impl Into<String>) -> Self {
        IntentData::GeneralChat(GeneralChat {
            message: Some(message.into()),
            ..Default::default()
        })
    }

    /// General chat recording why a real classification was not possible.
    pub fn general_chat_with_error(message: impl Into<String>, error: impl Into<String>) -> Self {
        IntentData::GeneralChat(GeneralChat {
            message: Some(message.into()),
            error: Some(error.into()),
            ..Default::default()
        })
    }

    /// The intent name as it appears on the wire.
    pub fn name(&self) -> &str {
        match self {
            IntentData::SendEmail(_) => SEND_EMAIL,
            IntentData::CreateEvent(_) => CREATE_EVENT,
            IntentData::AddTodo(_) => ADD_TODO,
            IntentData::SetReminder(_) => SET_REMINDER,
            IntentData::LinkedinPost(_) => LINKEDIN_POST,
            IntentData::GeneralChat(_) => GENERAL_CHAT,
            IntentData::Unknown(unknown) => &unknown.intent,
        }
    }

    /// True when no action is requested and the message is answered directly.
    ///
    /// Compares by name so a `general_chat` descriptor with malformed slots
    /// (held as `Unknown`) is still treated as conversation.
    pub fn is_general_chat(&self) -> bool {
        self.name() == GENERAL_CHAT
    }

    /// Builds a descriptor from a JSON object with an `"intent"` string key.
    ///
    /// A known intent whose slots do not fit the typed variant is kept as
    /// `Unknown` under the same name rather than rejected.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let Value::Object(mut slots) = value else {
            return Err(ValidationError::invalid_format(
                "intent_data",
                "expected a JSON object",
            ));
        };

        let intent = match slots.remove("intent") {
            Some(Value::String(name)) if !name.trim().is_empty() => name,
            _ => {
                return Err(ValidationError::invalid_format(
                    "intent_data",
                    "missing string 'intent' key",
                ))
            }
        };

        let typed = match intent.as_str() {
            SEND_EMAIL => typed_slots(&slots).map(IntentData::SendEmail),
            CREATE_EVENT => typed_slots(&slots).map(IntentData::CreateEvent),
            ADD_TODO => typed_slots(&slots).map(IntentData::AddTodo),
            SET_REMINDER => typed_slots(&slots).map(IntentData::SetReminder),
            LINKEDIN_POST => typed_slots(&slots).map(IntentData::LinkedinPost),
            GENERAL_CHAT => typed_slots(&slots).map(IntentData::GeneralChat),
            _ => None,
        };

        Ok(typed.unwrap_or(IntentData::Unknown(UnknownIntent { intent, slots })))
    }

    /// Flat JSON form: slots plus the `"intent"` key.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        let mut map = match self {
            IntentData::SendEmail(slots) => slot_map(slots)?,
            IntentData::CreateEvent(slots) => slot_map(slots)?,
            IntentData::AddTodo(slots) => slot_map(slots)?,
            IntentData::SetReminder(slots) => slot_map(slots)?,
            IntentData::LinkedinPost(slots) => slot_map(slots)?,
            IntentData::GeneralChat(slots) => slot_map(slots)?,
            IntentData::Unknown(unknown) => unknown.slots.clone(),
        };
        map.insert("intent".to_string(), Value::String(self.name().to_string()));
        Ok(Value::Object(map))
    }
}

fn typed_slots<T: DeserializeOwned>(slots: &Map<String, Value>) -> Option<T> {
    serde_json::from_value(Value::Object(slots.clone())).ok()
}

fn slot_map<T: Serialize>(slots: &T) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(slots)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

impl Serialize for IntentData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for IntentData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        IntentData::from_value(value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_known_intent_into_typed_slots() {
        let intent = IntentData::from_value(json!({
            "intent": "send_email",
            "recipient_name": "Priya",
            "subject": "AI Update",
            "body": "Here's the latest..."
        }))
        .unwrap();

        match intent {
            IntentData::SendEmail(email) => {
                assert_eq!(email.recipient_name.as_deref(), Some("Priya"));
                assert_eq!(email.subject.as_deref(), Some("AI Update"));
                assert!(email.recipient_email.is_none());
            }
            other => panic!("expected SendEmail, got {:?}", other),
        }
    }

    #[test]
    fn unknown_intent_keeps_name_and_slots() {
        let value = json!({"intent": "book_flight", "destination": "Paris"});
        let intent = IntentData::from_value(value.clone()).unwrap();

        assert_eq!(intent.name(), "book_flight");
        assert!(!intent.is_general_chat());
        assert_eq!(intent.to_value().unwrap(), value);
    }

    #[test]
    fn unmodelled_slots_survive_serialization() {
        let value = json!({
            "intent": "add_todo",
            "task": "File taxes",
            "priority": "high"
        });
        let intent: IntentData = serde_json::from_value(value.clone()).unwrap();
        assert!(matches!(intent, IntentData::AddTodo(_)));
        assert_eq!(serde_json::to_value(&intent).unwrap(), value);
    }

    #[test]
    fn known_intent_with_mistyped_slots_falls_back_to_unknown() {
        let value = json!({"intent": "create_event", "participants": "team@company.com"});
        let intent = IntentData::from_value(value.clone()).unwrap();

        assert!(matches!(intent, IntentData::Unknown(_)));
        assert_eq!(intent.name(), "create_event");
        assert_eq!(intent.to_value().unwrap(), value);
    }

    #[test]
    fn malformed_general_chat_is_still_general_chat() {
        let intent = IntentData::from_value(json!({"intent": "general_chat", "message": 42})).unwrap();
        assert!(intent.is_general_chat());
    }

    #[test]
    fn rejects_missing_intent_key() {
        assert!(IntentData::from_value(json!({"task": "x"})).is_err());
        assert!(IntentData::from_value(json!({"intent": ""})).is_err());
        assert!(IntentData::from_value(json!({"intent": 7})).is_err());
        assert!(IntentData::from_value(json!(["send_email"])).is_err());
    }

    #[test]
    fn deserialize_error_mentions_intent_key() {
        let err = serde_json::from_value::<IntentData>(json!({"task": "x"})).unwrap_err();
        assert!(err.to_string().contains("intent"));
    }

    #[test]
    fn general_chat_constructor_sets_message() {
        let intent = IntentData::general_chat("hello");
        assert_eq!(
            intent.to_value().unwrap(),
            json!({"intent": "general_chat", "message": "hello"})
        );
    }

    #[test]
    fn create_event_participants_are_typed() {
        let intent = IntentData::from_value(json!({
            "intent": "create_event",
            "event_title": "Team Meeting",
            "participants": ["team@company.com", "manager@company.com"]
        }))
        .unwrap();

        let IntentData::CreateEvent(event) = intent else {
            panic!("expected CreateEvent");
        };
        assert_eq!(event.participants.len(), 2);
        assert!(event.extra.is_empty());
    }
}
