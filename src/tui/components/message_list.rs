//! # MessageList Component
//!
//! Scrollable view of the open conversation thread.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the thread slice
//! (props). Heights are cached so scrolling doesn't re-wrap every message
//! every frame.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::text::Line;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::Message;
use crate::core::state::Phase;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageView;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
        }
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let total: u16 = self.layout.heights.iter().sum();
        let max_y = total.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll if the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let total: u16 = self.layout.heights.iter().sum();
        let max_y = total.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            _ => None,
        }
    }
}

/// Scrollable thread view. Created fresh each frame with references to
/// state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub thread: &'a [Message],
    pub phase: Phase,
    pub error: Option<&'a str>,
    pub theme: &'a Theme,
    pub spinner_frame: usize,
}

/// Animation frames for the typing indicator.
const SPINNER_FRAMES: [&str; 4] = ["   ", ".  ", ".. ", "..."];

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar safe area

        if self.phase == Phase::LoadingConversation {
            let line = Line::styled("Loading conversation...", self.theme.muted);
            frame.render_widget(line, area);
            return;
        }

        // 1. Update layout cache
        let reusable = self.state.layout.reusable_count(self.thread.len(), content_width);
        self.state.layout.heights.truncate(reusable);
        for message in self.thread.iter().skip(reusable) {
            self.state
                .layout
                .heights
                .push(MessageView::calculate_height(message, content_width));
        }
        self.state.layout.rebuild_prefix_heights();
        self.state
            .layout
            .update_metadata(self.thread.len(), content_width);

        let message_height: u16 = self.state.layout.heights.iter().sum();

        // Extra status lines below the thread
        let typing = self.phase == Phase::SendingMessage;
        let status_lines = u16::from(typing) + u16::from(self.error.is_some());
        let canvas_height = message_height + status_lines;

        // 2. Clamp scroll to content bounds (unless pinned to bottom)
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible messages into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = self.state.layout.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(MessageView::new(&self.thread[i], self.theme), rect);
            y_offset += height;
        }

        if typing {
            let dots = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            let rect = Rect::new(0, y_offset, content_width, 1);
            scroll_view.render_widget(
                Line::styled(format!("eddi is typing{}", dots), self.theme.muted),
                rect,
            );
            y_offset += 1;
        }

        if let Some(error) = self.error {
            let rect = Rect::new(0, y_offset, content_width, 1);
            scroll_view.render_widget(Line::styled(error.to_string(), self.theme.error), rect);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    /// How many cached heights survive this frame. Messages never mutate
    /// once in the thread, so the cache only invalidates on a width change
    /// or a shorter thread (conversation switch).
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || message_count < self.message_count {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc += h;
                Some(*acc)
            })
            .collect();
    }

    pub fn visible_range(
        &self,
        scroll_offset: u16,
        viewport_height: u16,
    ) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assistant_msg, user_msg};
    use crate::tui::theme::{Theme, ThemeMode};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_layout_cache_reusable() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3; 5];
        cache.update_metadata(5, 80);

        // Same everything -> all reusable
        assert_eq!(cache.reusable_count(5, 80), 5);
        // New message appended -> old 5 reusable
        assert_eq!(cache.reusable_count(6, 80), 5);
        // Width changed -> nothing reusable
        assert_eq!(cache.reusable_count(5, 40), 0);
        // Thread shrank (conversation switch) -> nothing reusable
        assert_eq!(cache.reusable_count(2, 80), 0);
    }

    #[test]
    fn test_visible_range_covers_scrolled_content() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![5; 10];
        cache.rebuild_prefix_heights();

        let range = cache.visible_range(0, 10);
        assert_eq!(range.start, 0);
        assert!(range.end >= 3);

        let range = cache.visible_range(25, 10);
        assert!(range.start > 0);
        assert!(range.contains(&5));
    }

    #[test]
    fn test_render_thread_smoke() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::from_mode(ThemeMode::Dark);
        let thread = vec![assistant_msg("Hello!"), user_msg("show tables")];
        let mut state = MessageListState::new();

        terminal
            .draw(|f| {
                let mut list = MessageList {
                    state: &mut state,
                    thread: &thread,
                    phase: Phase::Idle,
                    error: None,
                    theme: &theme,
                    spinner_frame: 0,
                };
                list.render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Hello!"));
        assert!(text.contains("show tables"));
    }

    #[test]
    fn test_render_shows_loading_line() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::from_mode(ThemeMode::Dark);
        let mut state = MessageListState::new();

        terminal
            .draw(|f| {
                let mut list = MessageList {
                    state: &mut state,
                    thread: &[],
                    phase: Phase::LoadingConversation,
                    error: None,
                    theme: &theme,
                    spinner_frame: 0,
                };
                list.render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Loading conversation..."));
    }

    #[test]
    fn test_render_shows_error_line() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::from_mode(ThemeMode::Dark);
        let thread = vec![user_msg("hi")];
        let mut state = MessageListState::new();

        terminal
            .draw(|f| {
                let mut list = MessageList {
                    state: &mut state,
                    thread: &thread,
                    phase: Phase::Idle,
                    error: Some("Failed to send message. Please try again."),
                    theme: &theme,
                    spinner_frame: 0,
                };
                list.render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Failed to send message. Please try again."));
    }

    #[test]
    fn test_scroll_up_unpins_from_bottom() {
        let mut state = MessageListState::new();
        assert!(state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
    }
}
