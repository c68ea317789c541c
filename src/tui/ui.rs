use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::{App, Phase};
use crate::tui::component::Component;
use crate::tui::components::{ConversationList, MessageList, TitleBar};
use crate::tui::{Focus, TuiState};

/// Sidebar width in columns.
const SIDEBAR_WIDTH: u16 = 32;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let [sidebar_area, right_area] =
        Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(frame.area());
    let [title_area, thread_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(3)]).areas(right_area);

    let mut sidebar = ConversationList {
        state: &mut tui.sidebar,
        conversations: &app.conversations,
        active_id: app.active_id.as_ref(),
        pending_delete: app.pending_delete.as_ref(),
        is_loading: app.list_loading,
        error: app.list_error.as_deref(),
        focused: tui.focus == Focus::Sidebar,
        theme: &tui.theme,
    };
    sidebar.render(frame, sidebar_area);

    let mut title_bar = TitleBar::new(conversation_title(app), status_text(app), tui.theme);
    title_bar.render(frame, title_area);

    let mut thread = MessageList {
        state: &mut tui.message_list,
        thread: &app.thread,
        phase: app.phase,
        error: app.thread_error.as_deref(),
        theme: &tui.theme,
        spinner_frame,
    };
    thread.render(frame, thread_area);

    tui.input.dimmed = tui.focus != Focus::Input || app.phase != Phase::Idle;
    tui.input.theme = tui.theme;
    tui.input.render(frame, input_area);
}

/// Title for the open conversation: its sidebar title when known, the raw
/// id as a fallback, "New Chat" when nothing is open.
fn conversation_title(app: &App) -> String {
    match &app.active_id {
        Some(id) => app
            .conversations
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.title.clone())
            .unwrap_or_else(|| format!("Conversation {}", id)),
        None => "New Chat".to_string(),
    }
}

fn status_text(app: &App) -> String {
    match app.phase {
        Phase::Idle => String::new(),
        Phase::LoadingConversation => "Loading...".to_string(),
        Phase::SendingMessage => "Sending...".to_string(),
    }
}
