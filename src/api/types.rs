//! Wire types for the EDDI chat API.
//!
//! Every endpoint gets an explicit request/response type and is decoded at
//! the boundary — a failed decode surfaces as [`ApiError::Decode`] instead of
//! leaking malformed data into application state.
//!
//! [`ApiError::Decode`]: super::ApiError::Decode

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Opaque server-assigned conversation identifier.
///
/// The backend emits string ids, but older deployments used numeric ones, so
/// deserialization accepts either and normalizes to a string. Serializes as
/// a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for ConversationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = ConversationId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer conversation id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(ConversationId(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ConversationId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ConversationId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A quick-reply option offered by the assistant. Clicking one resends its
/// `payload` verbatim (the payload is a serialized command string like
/// `/book_appointment{"date":"2023-01-01"}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub title: String,
    pub payload: String,
}

/// One entry in a conversation thread.
///
/// `timestamp` falls back between a client-assigned send time (optimistic
/// messages) and the server's `created_at` (history entries) — the alias
/// covers both wire spellings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub role: Role,
    pub content: String,
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<Button>>,
}

impl Message {
    /// The quick-reply buttons attached to this message, if any.
    pub fn buttons(&self) -> &[Button] {
        self.buttons.as_deref().unwrap_or_default()
    }
}

/// Summary row in the conversation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body for `POST /api/chat/send`. `conversation_id` is null for the first
/// message of a new thread.
#[derive(Debug, Clone, Serialize)]
pub struct SendRequest<'a> {
    pub conversation_id: Option<&'a ConversationId>,
    pub message: &'a str,
}

/// Body for `POST /api/chat/new`.
#[derive(Debug, Clone, Serialize)]
pub struct NewConversationRequest<'a> {
    pub message: &'a str,
}

/// Response to both send endpoints: the assistant's reply plus the id of the
/// conversation it landed in (server-assigned for new threads).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SendResponse {
    pub conversation_id: ConversationId,
    pub message: Message,
}

/// Response to `GET /api/chat/conversations/{id}`. Some backend revisions
/// omit `messages` entirely for empty threads.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationHistory {
    #[serde(default)]
    pub conversation_id: Option<ConversationId>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_id_accepts_string() {
        let id: ConversationId = serde_json::from_str("\"abc-123\"").unwrap();
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn conversation_id_accepts_number() {
        let id: ConversationId = serde_json::from_str("456").unwrap();
        assert_eq!(id.as_str(), "456");
    }

    #[test]
    fn conversation_id_serializes_as_string() {
        let json = serde_json::to_string(&ConversationId::new("456")).unwrap();
        assert_eq!(json, "\"456\"");
    }

    #[test]
    fn message_timestamp_accepts_created_at_alias() {
        let json = r#"{"role":"assistant","content":"Hi","created_at":"2025-04-04T14:31:00Z"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.timestamp.as_deref(), Some("2025-04-04T14:31:00Z"));
        assert!(msg.buttons().is_empty());
    }

    #[test]
    fn message_with_buttons_round_trips() {
        let json = r#"{
            "role": "assistant",
            "content": "Choose an option:",
            "buttons": [{"title": "Option 1", "payload": "/option1"}]
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.buttons().len(), 1);
        assert_eq!(msg.buttons()[0].payload, "/option1");
    }

    #[test]
    fn send_request_serializes_null_conversation_id() {
        let req = SendRequest {
            conversation_id: None,
            message: "Hello",
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["conversation_id"], serde_json::Value::Null);
        assert_eq!(json["message"], "Hello");
    }

    #[test]
    fn history_without_messages_field_is_empty() {
        let history: ConversationHistory = serde_json::from_str("{}").unwrap();
        assert!(history.messages.is_empty());
    }
}
