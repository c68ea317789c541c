//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//! The intention is to swap this out for a different adapter (web, etc.)
//! in the future if needed.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Busy** (sending, loading): draws every ~120ms so the typing
//!   indicator animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.

use log::{info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::ApiClient;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Phase};
use crate::core::storage::KeyValueStore;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ConversationListState, InputBox, InputEvent, MessageListState, SidebarEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::{Theme, ThemeMode, load_theme_mode, persist_theme_mode};

mod component;
mod components;
mod event;
pub mod theme;
mod ui;

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Input,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub sidebar: ConversationListState,
    pub message_list: MessageListState,
    pub input: InputBox,
    pub focus: Focus,
    pub theme_mode: ThemeMode,
    pub theme: Theme,
}

impl TuiState {
    pub fn new(theme_mode: ThemeMode) -> Self {
        let theme = Theme::from_mode(theme_mode);
        Self {
            sidebar: ConversationListState::new(),
            message_list: MessageListState::new(),
            input: InputBox::new(theme),
            focus: Focus::Input, // User expects to type immediately
            theme_mode,
            theme,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(
    config: &ResolvedConfig,
    store: Arc<dyn KeyValueStore>,
    token: Option<String>,
) -> std::io::Result<()> {
    let client = Arc::new(ApiClient::new(
        &config.base_url,
        token,
        Duration::from_secs(config.request_timeout_secs),
    ));

    let mut app = App::new();
    let mut tui = TuiState::new(load_theme_mode(store.as_ref()));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Kick off the initial sidebar fetch
    let effect = update(&mut app, Action::LoadConversations);
    run_effect(effect, &client, &tx);

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    loop {
        let busy = app.phase != Phase::Idle || app.list_loading;
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 4.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if busy {
            Duration::from_millis(120)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of focus
            if matches!(event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // Ctrl+T cycles the theme from anywhere
            if matches!(event, TuiEvent::ToggleTheme) {
                tui.theme_mode = tui.theme_mode.next();
                tui.theme = Theme::from_mode(tui.theme_mode);
                persist_theme_mode(store.as_ref(), tui.theme_mode);
                continue;
            }

            // Ctrl+N starts a new chat from anywhere
            if matches!(event, TuiEvent::NewChat) {
                dispatch(&mut app, Action::SelectConversation(None), &client, &tx);
                tui.message_list = MessageListState::new();
                tui.focus = Focus::Input;
                continue;
            }

            // Tab moves focus between the sidebar and the input box
            if matches!(event, TuiEvent::FocusNext) {
                tui.focus = match tui.focus {
                    Focus::Sidebar => Focus::Input,
                    Focus::Input => Focus::Sidebar,
                };
                continue;
            }

            // Scroll events always go to the thread view
            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
            ) {
                tui.message_list.handle_event(&event);
                continue;
            }

            // Modal event dispatch
            match tui.focus {
                Focus::Input => {
                    // Esc hands focus to the sidebar
                    if matches!(event, TuiEvent::Escape) {
                        tui.focus = Focus::Sidebar;
                        continue;
                    }
                    if let Some(InputEvent::Submit(text)) = tui.input.handle_event(&event) {
                        dispatch(&mut app, Action::Submit(text), &client, &tx);
                        tui.message_list.stick_to_bottom = true;
                    }
                }
                Focus::Sidebar => {
                    let sidebar_event = tui.sidebar.handle_event(
                        &event,
                        &app.conversations,
                        app.pending_delete.as_ref(),
                    );
                    match sidebar_event {
                        Some(SidebarEvent::Open(id)) => {
                            dispatch(
                                &mut app,
                                Action::SelectConversation(Some(id)),
                                &client,
                                &tx,
                            );
                            tui.message_list = MessageListState::new();
                            tui.focus = Focus::Input;
                        }
                        Some(SidebarEvent::NewChat) => {
                            dispatch(&mut app, Action::SelectConversation(None), &client, &tx);
                            tui.message_list = MessageListState::new();
                            tui.focus = Focus::Input;
                        }
                        Some(SidebarEvent::RequestDelete(id)) => {
                            dispatch(&mut app, Action::RequestDelete(id), &client, &tx);
                        }
                        Some(SidebarEvent::ConfirmDelete) => {
                            dispatch(&mut app, Action::ConfirmDelete, &client, &tx);
                        }
                        Some(SidebarEvent::Dismiss) => {
                            dispatch(&mut app, Action::DismissDelete, &client, &tx);
                        }
                        None => {}
                    }
                }
            }
        }

        // Handle background task actions (HTTP results, delayed selects)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            let switched_thread = matches!(
                &action,
                Action::ConversationLoaded { .. } | Action::SelectConversation(_)
            );
            let effect = update(&mut app, action);
            if effect == Effect::Quit {
                should_quit = true;
                break;
            }
            run_effect(effect, &client, &tx);
            if switched_thread {
                tui.message_list.stick_to_bottom = true;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Applies an action and immediately runs the resulting effect.
fn dispatch(app: &mut App, action: Action, client: &Arc<ApiClient>, tx: &mpsc::Sender<Action>) {
    let effect = update(app, action);
    run_effect(effect, client, tx);
}

/// Executes an effect by spawning a background task that reports back
/// through the action channel. `Effect::Quit` is handled by the caller.
fn run_effect(effect: Effect, client: &Arc<ApiClient>, tx: &mpsc::Sender<Action>) {
    match effect {
        Effect::None | Effect::Quit => {}

        Effect::SendMessage {
            conversation_id,
            text,
        } => {
            info!("Sending message (conversation: {:?})", conversation_id);
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let action = match client.send_message(conversation_id.as_ref(), &text).await {
                    Ok(response) => Action::SendCompleted {
                        conversation_id: response.conversation_id,
                        message: response.message,
                    },
                    Err(e) => {
                        warn!("Send failed: {}", e);
                        Action::SendFailed
                    }
                };
                if tx.send(action).is_err() {
                    warn!("Failed to deliver send result: receiver dropped");
                }
            });
        }

        Effect::FetchConversation(id) => {
            info!("Fetching conversation {}", id);
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let action = match client.get_conversation(&id).await {
                    Ok(history) => Action::ConversationLoaded {
                        id,
                        messages: history.messages,
                    },
                    Err(e) => {
                        warn!("Failed to fetch conversation {}: {}", id, e);
                        Action::ConversationLoadFailed(id)
                    }
                };
                if tx.send(action).is_err() {
                    warn!("Failed to deliver conversation history: receiver dropped");
                }
            });
        }

        Effect::FetchConversations => {
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let action = match client.list_conversations().await {
                    Ok(conversations) => Action::ConversationsLoaded(conversations),
                    Err(e) => {
                        warn!("Failed to list conversations: {}", e);
                        Action::ConversationsLoadFailed
                    }
                };
                if tx.send(action).is_err() {
                    warn!("Failed to deliver conversation list: receiver dropped");
                }
            });
        }

        Effect::RefreshConversations => {
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let action = match client.list_conversations().await {
                    Ok(conversations) => Action::RefreshCompleted(conversations),
                    Err(e) => {
                        warn!("Background refresh failed: {}", e);
                        Action::RefreshFailed
                    }
                };
                if tx.send(action).is_err() {
                    warn!("Failed to deliver refreshed list: receiver dropped");
                }
            });
        }

        Effect::DeleteConversation(id) => {
            info!("Deleting conversation {}", id);
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let action = match client.delete_conversation(&id).await {
                    Ok(()) => Action::DeleteCompleted(id),
                    Err(e) => {
                        warn!("Failed to delete conversation {}: {}", id, e);
                        Action::DeleteFailed(id)
                    }
                };
                if tx.send(action).is_err() {
                    warn!("Failed to deliver delete result: receiver dropped");
                }
            });
        }

        // Give the sidebar a beat to render the refreshed list before the
        // new conversation is marked selected.
        Effect::SelectAfterDelay(id) => {
            let tx = tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                if tx.send(Action::SelectConversation(Some(id))).is_err() {
                    warn!("Failed to deliver delayed select: receiver dropped");
                }
            });
        }
    }
}
