//! # TitleBar Component
//!
//! Single-line header showing the open conversation and transient status.
//!
//! Stateless: all three props come from elsewhere (`title` from the active
//! conversation, `status` computed from the current phase, `theme` from
//! TUI state) and the bar just renders what it's given.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct TitleBar {
    /// Active conversation title, or "New Chat".
    pub title: String,
    /// Transient status (e.g. "Sending...", empty when idle).
    pub status: String,
    pub theme: Theme,
}

impl TitleBar {
    pub fn new(title: String, status: String, theme: Theme) -> Self {
        Self {
            title,
            status,
            theme,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("Eddi", self.theme.accent),
            Span::raw(" | "),
            Span::raw(self.title.as_str()),
        ];
        if !self.status.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(self.status.as_str(), self.theme.muted));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::theme::{Theme, ThemeMode};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn renders_title_and_status() {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut bar = TitleBar::new(
            "Inventory questions".to_string(),
            "Sending...".to_string(),
            Theme::from_mode(ThemeMode::Dark),
        );

        terminal.draw(|f| bar.render(f, f.area())).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Eddi"));
        assert!(text.contains("Inventory questions"));
        assert!(text.contains("Sending..."));
    }

    #[test]
    fn omits_status_separator_when_idle() {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut bar = TitleBar::new(
            "New Chat".to_string(),
            String::new(),
            Theme::from_mode(ThemeMode::Dark),
        );

        terminal.draw(|f| bar.render(f, f.area())).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Eddi | New Chat"));
        assert!(!text.contains("New Chat |"));
    }
}
