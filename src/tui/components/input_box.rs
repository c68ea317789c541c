//! # InputBox Component
//!
//! Single-line message input. The buffer is internal state; everything
//! else (focus, disabled flag, theme) comes in as props each frame.
//!
//! While a send or load is in flight the box is dimmed and submits are
//! swallowed, matching the core reducer which also ignores them.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

const PLACEHOLDER: &str = "How can I help you today?";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text content changed
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (internal state)
    pub buffer: String,
    /// Cursor position as a byte offset into `buffer`
    cursor: usize,
    /// Dimmed while unfocused or while the app is busy (prop)
    pub dimmed: bool,
    pub theme: Theme,
}

impl InputBox {
    pub fn new(theme: Theme) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            dimmed: false,
            theme,
        }
    }
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(s.len())
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.dimmed {
            self.theme.border
        } else {
            self.theme.accent
        };

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title(" Message ");

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(self.theme.muted)
        } else {
            Paragraph::new(self.buffer.as_str())
        };
        frame.render_widget(paragraph.block(block), area);

        if !self.dimmed {
            let cursor_x = area.x + 1 + self.buffer[..self.cursor].width() as u16;
            let max_x = area.x + area.width.saturating_sub(2);
            frame.set_cursor_position((cursor_x.min(max_x), area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Pasted newlines would break the single-line layout
                let text: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(self.cursor..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    None
                } else {
                    let text = std::mem::take(&mut self.buffer);
                    self.cursor = 0;
                    Some(InputEvent::Submit(text))
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::theme::{Theme, ThemeMode};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn input() -> InputBox {
        InputBox::new(Theme::from_mode(ThemeMode::Dark))
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = input();
        input.handle_event(&TuiEvent::InputChar('h'));
        input.handle_event(&TuiEvent::InputChar('i'));
        assert_eq!(input.buffer, "hi");

        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "h");
    }

    #[test]
    fn test_submit_clears_buffer() {
        let mut input = input();
        input.buffer = "show tables".to_string();
        input.cursor = input.buffer.len();

        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("show tables".to_string())));
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_blank_submit_emits_nothing() {
        let mut input = input();
        input.buffer = "   ".to_string();
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_multibyte_editing_respects_boundaries() {
        let mut input = input();
        input.handle_event(&TuiEvent::InputChar('é'));
        input.handle_event(&TuiEvent::InputChar('x'));
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "x");
    }

    #[test]
    fn test_paste_strips_newlines() {
        let mut input = input();
        input.handle_event(&TuiEvent::Paste("line1\nline2".to_string()));
        assert_eq!(input.buffer, "line1line2");
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = input();

        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("How can I help you today?"));
    }
}
