//! # Actions
//!
//! Everything that can happen in Eddi becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! History arrives? That's `Action::ConversationLoaded`.
//!
//! The `update()` function takes the current state and an action,
//! then returns an `Effect` describing the I/O to perform. No side
//! effects here. HTTP happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: feed actions, assert on state.
//! And debuggable: log every action, replay the exact session.

use log::debug;

use crate::api::{Conversation, ConversationId, Message, Role};
use crate::core::payload::process_button_payload;
use crate::core::state::{App, Phase, intro_message};

pub const LOAD_CONVERSATION_ERROR: &str = "Failed to load conversation";
pub const SEND_ERROR: &str = "Failed to send message. Please try again.";
pub const LOAD_LIST_ERROR: &str = "Failed to load conversations";

#[derive(Debug, Clone)]
pub enum Action {
    /// Text submitted from the input box.
    Submit(String),
    /// A quick-reply button was activated; carries the raw payload, which
    /// goes over the wire verbatim. The click-equivalent surface for
    /// frontends with pointer support; in the terminal, typing the button's
    /// number reaches the same payload through [`Action::Submit`].
    ButtonPressed(String),
    /// Open a conversation (`None` = start a new chat).
    SelectConversation(Option<ConversationId>),
    ConversationLoaded {
        id: ConversationId,
        messages: Vec<Message>,
    },
    ConversationLoadFailed(ConversationId),
    SendCompleted {
        conversation_id: ConversationId,
        message: Message,
    },
    SendFailed,
    /// Initial sidebar fetch (blocks the sidebar with a skeleton).
    LoadConversations,
    ConversationsLoaded(Vec<Conversation>),
    ConversationsLoadFailed,
    /// Background refresh results (sidebar stays interactive meanwhile).
    RefreshCompleted(Vec<Conversation>),
    RefreshFailed,
    /// First press of the delete button on a sidebar entry.
    RequestDelete(ConversationId),
    DismissDelete,
    /// Second press: actually issue the delete.
    ConfirmDelete,
    DeleteCompleted(ConversationId),
    DeleteFailed(ConversationId),
    Quit,
}

/// I/O the event loop must perform after an `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SendMessage {
        conversation_id: Option<ConversationId>,
        text: String,
    },
    FetchConversation(ConversationId),
    /// Sidebar fetch for `LoadConversations`.
    FetchConversations,
    /// Sidebar fetch after a send created a new conversation.
    RefreshConversations,
    DeleteConversation(ConversationId),
    /// Select `id` after a short delay, once the refreshed list shows it.
    SelectAfterDelay(ConversationId),
    Quit,
}

/// The reducer. Applies `action` to `app` and returns the effect to run.
pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => submit(app, text),

        Action::ButtonPressed(payload) => {
            // The payload goes over the wire verbatim; the intent name is
            // only extracted for the log line.
            debug!("Button activated: {}", process_button_payload(&payload));
            submit(app, payload)
        }

        Action::SelectConversation(target) => {
            if target == app.active_id {
                return Effect::None;
            }
            app.pending_delete = None;
            app.thread_error = None;
            match target {
                Some(id) => {
                    debug!("Opening conversation {}", id);
                    app.active_id = Some(id.clone());
                    app.thread.clear();
                    app.phase = Phase::LoadingConversation;
                    Effect::FetchConversation(id)
                }
                None => {
                    debug!("Starting new chat");
                    app.active_id = None;
                    app.thread = vec![intro_message()];
                    app.phase = Phase::Idle;
                    Effect::None
                }
            }
        }

        // Applied unconditionally: a late result for a conversation the user
        // has already navigated away from still lands. See DESIGN.md.
        Action::ConversationLoaded { id, messages } => {
            debug!("Loaded {} messages for conversation {}", messages.len(), id);
            app.thread = with_intro(messages);
            app.phase = Phase::Idle;
            app.thread_error = None;
            Effect::None
        }

        Action::ConversationLoadFailed(id) => {
            debug!("Load failed for conversation {}", id);
            app.thread_error = Some(LOAD_CONVERSATION_ERROR.to_string());
            app.phase = Phase::Idle;
            Effect::None
        }

        Action::SendCompleted {
            conversation_id,
            message,
        } => {
            let mut message = message;
            message
                .timestamp
                .get_or_insert_with(|| chrono::Utc::now().to_rfc3339());
            app.thread.push(message);
            app.phase = Phase::Idle;

            // First message of a new chat: the server just created the
            // conversation. Adopt its id and refresh the sidebar so the
            // new entry appears and gets selected.
            if app.active_id.is_none() {
                app.active_id = Some(conversation_id.clone());
                app.pending_select = Some(conversation_id);
                if !app.list_refreshing {
                    app.list_refreshing = true;
                    return Effect::RefreshConversations;
                }
            }
            Effect::None
        }

        Action::SendFailed => {
            // The optimistic user message stays in the thread.
            app.thread_error = Some(SEND_ERROR.to_string());
            app.phase = Phase::Idle;
            Effect::None
        }

        Action::LoadConversations => {
            app.list_loading = true;
            app.list_error = None;
            Effect::FetchConversations
        }

        Action::ConversationsLoaded(conversations) => {
            app.list_loading = false;
            app.list_error = None;
            app.conversations = conversations;
            Effect::None
        }

        Action::ConversationsLoadFailed => {
            app.list_loading = false;
            app.list_error = Some(LOAD_LIST_ERROR.to_string());
            Effect::None
        }

        Action::RefreshCompleted(conversations) => {
            app.list_refreshing = false;
            app.conversations = conversations;
            if let Some(id) = app.pending_select.take() {
                if app.conversations.iter().any(|c| c.id == id) {
                    return Effect::SelectAfterDelay(id);
                }
            }
            Effect::None
        }

        Action::RefreshFailed => {
            // Background refresh failures never surface in the UI.
            app.list_refreshing = false;
            app.pending_select = None;
            Effect::None
        }

        Action::RequestDelete(id) => {
            app.pending_delete = Some(id);
            Effect::None
        }

        Action::DismissDelete => {
            app.pending_delete = None;
            Effect::None
        }

        Action::ConfirmDelete => match app.pending_delete.take() {
            Some(id) => Effect::DeleteConversation(id),
            None => Effect::None,
        },

        Action::DeleteCompleted(id) => {
            app.conversations.retain(|c| c.id != id);
            if app.active_id.as_ref() == Some(&id) {
                app.active_id = None;
                app.thread = vec![intro_message()];
                app.thread_error = None;
                app.phase = Phase::Idle;
            }
            Effect::None
        }

        // Deletes fail quietly; the entry stays in the sidebar. The task
        // that issued the request logs the error.
        Action::DeleteFailed(_) => Effect::None,

        Action::Quit => Effect::Quit,
    }
}

/// Shared submit path for typed text and button presses.
fn submit(app: &mut App, text: String) -> Effect {
    let text = text.trim().to_string();
    if text.is_empty() || app.phase != Phase::Idle {
        return Effect::None;
    }

    // A bare number picks the matching quick-reply button from the last
    // message, so "2" sends the second button's payload.
    let outgoing = numbered_button_payload(app, &text).unwrap_or(text);

    app.thread.push(Message {
        id: None,
        role: Role::User,
        content: outgoing.clone(),
        timestamp: Some(chrono::Utc::now().to_rfc3339()),
        buttons: None,
    });
    app.thread_error = None;
    app.phase = Phase::SendingMessage;

    Effect::SendMessage {
        conversation_id: app.active_id.clone(),
        text: outgoing,
    }
}

/// Resolves a typed number to the raw payload of the corresponding button
/// on the last thread message, if any.
fn numbered_button_payload(app: &App, text: &str) -> Option<String> {
    let n: usize = text.parse().ok()?;
    let buttons = app.thread.last()?.buttons();
    if n == 0 || n > buttons.len() {
        return None;
    }
    Some(buttons[n - 1].payload.clone())
}

/// Ensures the greeting heads the thread without duplicating one the
/// server already included.
fn with_intro(messages: Vec<Message>) -> Vec<Message> {
    let has_intro = messages
        .iter()
        .any(|m| m.content.contains(crate::core::state::INTRO_MESSAGE));
    if has_intro {
        messages
    } else {
        let mut thread = Vec::with_capacity(messages.len() + 1);
        thread.push(intro_message());
        thread.extend(messages);
        thread
    }
}
