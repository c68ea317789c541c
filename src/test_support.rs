//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::api::{Button, Conversation, ConversationId, Message, Role};

pub fn user_msg(content: &str) -> Message {
    Message {
        id: None,
        role: Role::User,
        content: content.to_string(),
        timestamp: Some("2026-01-15T10:00:00Z".to_string()),
        buttons: None,
    }
}

pub fn assistant_msg(content: &str) -> Message {
    Message {
        id: None,
        role: Role::Assistant,
        content: content.to_string(),
        timestamp: Some("2026-01-15T10:00:01Z".to_string()),
        buttons: None,
    }
}

pub fn assistant_msg_with_buttons(content: &str, buttons: &[(&str, &str)]) -> Message {
    Message {
        buttons: Some(
            buttons
                .iter()
                .map(|(title, payload)| Button {
                    title: title.to_string(),
                    payload: payload.to_string(),
                })
                .collect(),
        ),
        ..assistant_msg(content)
    }
}

pub fn conversation(id: &str, title: &str) -> Conversation {
    Conversation {
        id: ConversationId::new(id),
        title: title.to_string(),
        updated_at: Some("2026-01-15T10:00:00Z".to_string()),
    }
}
