//! # Application State
//!
//! Core business state for Eddi. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── active_id: Option<ConversationId>  // open conversation (None = new chat)
//! ├── thread: Vec<Message>               // messages in the open thread
//! ├── phase: Phase                       // Idle / LoadingConversation / SendingMessage
//! ├── thread_error: Option<String>       // banner shown above the input box
//! ├── conversations: Vec<Conversation>   // sidebar entries
//! ├── list_loading: bool                 // initial sidebar fetch in flight
//! ├── list_refreshing: bool              // background refresh in flight
//! ├── list_error: Option<String>         // sidebar error line
//! ├── pending_delete: Option<ConversationId>   // first press of a two-step delete
//! └── pending_select: Option<ConversationId>   // newly created chat awaiting auto-select
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::api::{Conversation, ConversationId, Message, Role};

/// Greeting shown at the top of every thread.
pub const INTRO_MESSAGE: &str = "Welcome to the Database Management Assistant! \u{1F44B}";

/// Builds the synthetic assistant greeting that opens every thread.
pub fn intro_message() -> Message {
    Message {
        id: None,
        role: Role::Assistant,
        content: INTRO_MESSAGE.to_string(),
        timestamp: None,
        buttons: None,
    }
}

/// What the thread is currently waiting on. Input is disabled outside `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LoadingConversation,
    SendingMessage,
}

pub struct App {
    pub active_id: Option<ConversationId>,
    pub thread: Vec<Message>,
    pub phase: Phase,
    pub thread_error: Option<String>,
    pub conversations: Vec<Conversation>,
    pub list_loading: bool,
    pub list_refreshing: bool,
    pub list_error: Option<String>,
    /// Conversation whose delete button was pressed once (second press confirms).
    pub pending_delete: Option<ConversationId>,
    /// Conversation created by the last send, to be selected once the
    /// refreshed list contains it.
    pub pending_select: Option<ConversationId>,
}

impl App {
    pub fn new() -> Self {
        Self {
            active_id: None,
            thread: vec![intro_message()],
            phase: Phase::Idle,
            thread_error: None,
            conversations: Vec::new(),
            list_loading: false,
            list_refreshing: false,
            list_error: None,
            pending_delete: None,
            pending_select: None,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_new_defaults() {
        let app = App::new();
        assert!(app.active_id.is_none());
        assert_eq!(app.phase, Phase::Idle);
        assert_eq!(app.thread.len(), 1);
        assert_eq!(app.thread[0].content, INTRO_MESSAGE);
        assert_eq!(app.thread[0].role, Role::Assistant);
        assert!(app.conversations.is_empty());
    }
}
