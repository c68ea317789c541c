use ratatui::layout::Rect;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Padding, Paragraph, Widget};

use crate::api::{Message, Role};
use crate::tui::theme::Theme;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single chat message.
///
/// `MessageView` is a **transient component**: created fresh each frame with
/// the data it needs to render. Quick-reply buttons are shown as numbered
/// lines below the content; typing the number in the input box activates
/// the matching button.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts rendered height
/// using `textwrap` with options that match the actual rendering (the
/// content is pre-wrapped with the same options), so the parent list can
/// compute scroll positions without rendering each message.
#[derive(Clone, Copy)]
pub struct MessageView<'a> {
    pub message: &'a Message,
    pub theme: &'a Theme,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message, theme: &'a Theme) -> Self {
        Self { message, theme }
    }

    /// Calculate the height required for this message given a width.
    ///
    /// Wrapped content lines plus one line per quick-reply button, plus
    /// border overhead.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding. Return 1 row so
            // the message still occupies space in the layout.
            return 1;
        }

        let button_lines = message.buttons().len() as u16;
        let content = message.content.trim();
        if content.is_empty() {
            return button_lines + VERTICAL_OVERHEAD;
        }

        let lines = wrapped_lines(content, content_width);
        (lines.len() as u16).max(1) + button_lines + VERTICAL_OVERHEAD
    }
}

fn wrap_options(content_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(content_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

fn wrapped_lines(content: &str, content_width: u16) -> Vec<String> {
    textwrap::wrap(content, wrap_options(content_width))
        .into_iter()
        .map(|l| l.into_owned())
        .collect()
}

impl<'a> Widget for MessageView<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let (role, style) = match self.message.role {
            Role::User => ("you", self.theme.user),
            Role::Assistant => ("eddi", self.theme.assistant),
        };

        let mut block = Block::bordered()
            .title(role)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(style)
            .title_style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        if let Some(ts) = &self.message.timestamp {
            block = block.title_bottom(
                Line::styled(format_timestamp(ts), self.theme.muted).right_aligned(),
            );
        }

        let inner_area = block.inner(area);
        block.render(area, buf);

        // Pre-wrap with the same options calculate_height uses so the two
        // always agree.
        let content = self.message.content.trim();
        let mut lines: Vec<Line> = wrapped_lines(content, inner_area.width)
            .into_iter()
            .map(|l| Line::styled(l, style))
            .collect();

        for (i, button) in self.message.buttons().iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("[{}] ", i + 1), self.theme.accent),
                Span::styled(button.title.clone(), self.theme.accent),
            ]));
        }

        Paragraph::new(Text::from(lines)).render(inner_area, buf);
    }
}

/// Shortens an RFC 3339 timestamp to "HH:MM" for display. Anything that
/// doesn't parse is shown as-is.
fn format_timestamp(ts: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(ts) {
        Ok(dt) => dt.format("%H:%M").to_string(),
        Err(_) => ts.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assistant_msg, assistant_msg_with_buttons, user_msg};

    #[test]
    fn calculate_height_single_line_fits() {
        let msg = user_msg("Hello");
        assert_eq!(
            MessageView::calculate_height(&msg, 80),
            1 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_wraps_at_width_boundary() {
        // "Hello world" = 11 chars, width 9 → content_width = 5
        // Wraps to: "Hello" | "world" = 2 lines
        let msg = user_msg("Hello world");
        assert_eq!(MessageView::calculate_height(&msg, 9), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_breaks_long_words() {
        // "abcdefghij" = 10 chars, width 8 → content_width = 4 → 3 lines
        let msg = user_msg("abcdefghij");
        assert_eq!(MessageView::calculate_height(&msg, 8), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_counts_button_lines() {
        let msg = assistant_msg_with_buttons("Pick one", &[("A", "/a"), ("B", "/b")]);
        assert_eq!(
            MessageView::calculate_height(&msg, 80),
            1 + 2 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_empty_content_returns_border_height() {
        let msg = assistant_msg("");
        assert_eq!(MessageView::calculate_height(&msg, 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let msg = user_msg("Hello world");
        assert_eq!(MessageView::calculate_height(&msg, 0), 1);
    }

    #[test]
    fn format_timestamp_shortens_rfc3339() {
        assert_eq!(format_timestamp("2026-01-15T10:30:00+00:00"), "10:30");
    }

    #[test]
    fn format_timestamp_passes_through_garbage() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
