//! # ConversationList Component
//!
//! Sidebar listing past conversations, with two-step delete.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ConversationListState` lives in `TuiState`
//! - `ConversationList` is created each frame with borrowed state
//!
//! Deleting takes two presses of `d`: the first arms the entry (shown in
//! red), the second confirms. Any other key disarms it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::{Conversation, ConversationId};
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

/// Persistent state for the sidebar.
pub struct ConversationListState {
    pub selected: usize,
    pub list_state: ListState,
}

impl Default for ConversationListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationListState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default(),
        }
    }

    /// Handle a key event while the sidebar has focus.
    ///
    /// `conversations` and `pending_delete` are read-only views of core
    /// state; the returned event tells the caller what to dispatch.
    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        conversations: &[Conversation],
        pending_delete: Option<&ConversationId>,
    ) -> Option<SidebarEvent> {
        // Anything but another 'd' disarms a pending delete
        let is_delete_key = matches!(event, TuiEvent::InputChar('d'));
        let disarm = (!is_delete_key && pending_delete.is_some()).then_some(SidebarEvent::Dismiss);

        match event {
            TuiEvent::Escape => disarm,
            TuiEvent::CursorUp => {
                if !conversations.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                disarm
            }
            TuiEvent::CursorDown => {
                if !conversations.is_empty() {
                    self.selected = (self.selected + 1).min(conversations.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                disarm
            }
            TuiEvent::Submit => conversations
                .get(self.selected)
                .map(|c| SidebarEvent::Open(c.id.clone()))
                .or(disarm),
            TuiEvent::InputChar('n') => Some(SidebarEvent::NewChat),
            TuiEvent::InputChar('d') => {
                let selected = conversations.get(self.selected)?;
                if pending_delete == Some(&selected.id) {
                    Some(SidebarEvent::ConfirmDelete)
                } else {
                    Some(SidebarEvent::RequestDelete(selected.id.clone()))
                }
            }
            _ => disarm,
        }
    }

    /// Keep the selection within bounds after the list changes.
    pub fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }
}

/// Events emitted by the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarEvent {
    Open(ConversationId),
    NewChat,
    RequestDelete(ConversationId),
    ConfirmDelete,
    /// Disarm a pending delete.
    Dismiss,
}

/// Transient render wrapper for the sidebar.
pub struct ConversationList<'a> {
    pub state: &'a mut ConversationListState,
    pub conversations: &'a [Conversation],
    pub active_id: Option<&'a ConversationId>,
    pub pending_delete: Option<&'a ConversationId>,
    pub is_loading: bool,
    pub error: Option<&'a str>,
    pub focused: bool,
    pub theme: &'a Theme,
}

impl<'a> Component for ConversationList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help_text = if self.pending_delete.is_some() {
            " d again to confirm "
        } else {
            " n New  d Delete  Enter Open "
        };

        let border_style = if self.focused {
            self.theme.accent
        } else {
            self.theme.border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Conversations ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.is_loading {
            let skeleton = Paragraph::new("Loading...")
                .style(self.theme.muted)
                .block(block);
            frame.render_widget(skeleton, area);
            return;
        }

        if let Some(error) = self.error {
            let line = Paragraph::new(error).style(self.theme.error).block(block);
            frame.render_widget(line, area);
            return;
        }

        if self.conversations.is_empty() {
            let empty = Paragraph::new("No conversations yet.")
                .style(self.theme.muted)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner_width = area.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .conversations
            .iter()
            .enumerate()
            .map(|(i, conversation)| {
                let armed = self.pending_delete == Some(&conversation.id);
                let is_active = self.active_id == Some(&conversation.id);

                let marker = if is_active { "> " } else { "  " };
                let title = truncate_str(&conversation.title, inner_width.saturating_sub(2));

                let style = if armed {
                    self.theme.error
                } else if self.focused && i == self.state.selected {
                    self.theme.selection
                } else if is_active {
                    self.theme.accent
                } else {
                    Style::default()
                };

                ListItem::new(Line::styled(format!("{marker}{title}"), style))
            })
            .collect();

        let list = List::new(items).block(block);
        self.state.clamp_selection(self.conversations.len());
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` terminal columns, adding
/// "..." if needed. Measures display width, not chars, so CJK and emoji
/// titles stay inside the cell.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let budget = max_width - 3;
    let mut head = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        head.push(ch);
        used += w;
    }
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::conversation;
    use crate::tui::theme::ThemeMode;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn id(s: &str) -> ConversationId {
        ConversationId::new(s)
    }

    #[test]
    fn enter_opens_the_selected_conversation() {
        let conversations = vec![conversation("1", "First"), conversation("2", "Second")];
        let mut state = ConversationListState::new();
        state.handle_event(&TuiEvent::CursorDown, &conversations, None);

        let event = state.handle_event(&TuiEvent::Submit, &conversations, None);
        assert_eq!(event, Some(SidebarEvent::Open(id("2"))));
    }

    #[test]
    fn n_starts_a_new_chat() {
        let mut state = ConversationListState::new();
        let event = state.handle_event(&TuiEvent::InputChar('n'), &[], None);
        assert_eq!(event, Some(SidebarEvent::NewChat));
    }

    #[test]
    fn first_d_arms_second_d_confirms() {
        let conversations = vec![conversation("1", "First")];
        let mut state = ConversationListState::new();

        let event = state.handle_event(&TuiEvent::InputChar('d'), &conversations, None);
        assert_eq!(event, Some(SidebarEvent::RequestDelete(id("1"))));

        let armed = id("1");
        let event = state.handle_event(&TuiEvent::InputChar('d'), &conversations, Some(&armed));
        assert_eq!(event, Some(SidebarEvent::ConfirmDelete));
    }

    #[test]
    fn moving_the_cursor_disarms_a_pending_delete() {
        let conversations = vec![conversation("1", "First"), conversation("2", "Second")];
        let mut state = ConversationListState::new();
        let armed = id("1");

        let event = state.handle_event(&TuiEvent::CursorDown, &conversations, Some(&armed));
        assert_eq!(event, Some(SidebarEvent::Dismiss));
    }

    #[test]
    fn d_with_empty_list_does_nothing() {
        let mut state = ConversationListState::new();
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), &[], None), None);
    }

    #[test]
    fn selection_clamps_after_deletion() {
        let mut state = ConversationListState::new();
        state.selected = 2;
        state.clamp_selection(1);
        assert_eq!(state.selected, 0);
        state.clamp_selection(0);
        assert_eq!(state.list_state.selected(), None);
    }

    #[test]
    fn render_shows_titles_and_empty_state() {
        let backend = TestBackend::new(32, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::from_mode(ThemeMode::Dark);
        let conversations = vec![conversation("1", "Inventory questions")];
        let mut state = ConversationListState::new();

        terminal
            .draw(|f| {
                let mut sidebar = ConversationList {
                    state: &mut state,
                    conversations: &conversations,
                    active_id: None,
                    pending_delete: None,
                    is_loading: false,
                    error: None,
                    focused: true,
                    theme: &theme,
                };
                sidebar.render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Conversations"));
        assert!(text.contains("Inventory"));
    }

    #[test]
    fn render_shows_list_error() {
        let backend = TestBackend::new(32, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::from_mode(ThemeMode::Dark);
        let mut state = ConversationListState::new();

        terminal
            .draw(|f| {
                let mut sidebar = ConversationList {
                    state: &mut state,
                    conversations: &[],
                    active_id: None,
                    pending_delete: None,
                    is_loading: false,
                    error: Some("Failed to load conversations"),
                    focused: false,
                    theme: &theme,
                };
                sidebar.render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Failed to load"));
    }

    #[test]
    fn truncate_str_adds_ellipsis() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a much longer title", 10), "a much ...");
        assert_eq!(truncate_str("abc", 2), "..");
    }

    #[test]
    fn truncate_str_measures_display_width() {
        // Each CJK char is two columns wide.
        assert_eq!(truncate_str("数据库助手", 10), "数据库助手");
        assert_eq!(truncate_str("数据库助手对话", 10), "数据库...");
        assert!(truncate_str("db 数据库助手对话", 9).width() <= 9);
    }
}
