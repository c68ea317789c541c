//! # Theming
//!
//! Two color palettes (dark and light), toggled with Ctrl+T. The chosen
//! mode is persisted through the key-value store so it survives restarts.

use log::warn;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

use crate::core::storage::{KeyValueStore, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Dark => "Dark",
            ThemeMode::Light => "Light",
        }
    }

    fn from_key(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }

    fn as_key(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }
}

/// Concrete styles derived from a `ThemeMode`.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub user: Style,
    pub assistant: Style,
    pub accent: Style,
    pub muted: Style,
    pub error: Style,
    pub border: Style,
    pub selection: Style,
}

impl Theme {
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self {
                user: Style::default().fg(Color::Green),
                assistant: Style::default().fg(Color::Blue),
                accent: Style::default().fg(Color::Cyan),
                muted: Style::default().fg(Color::DarkGray),
                error: Style::default().fg(Color::Red),
                border: Style::default().fg(Color::DarkGray),
                selection: Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            },
            ThemeMode::Light => Self {
                user: Style::default().fg(Color::Rgb(0, 110, 0)),
                assistant: Style::default().fg(Color::Rgb(0, 60, 160)),
                accent: Style::default().fg(Color::Rgb(0, 120, 140)),
                muted: Style::default().fg(Color::Gray),
                error: Style::default().fg(Color::Rgb(180, 0, 0)),
                border: Style::default().fg(Color::Gray),
                selection: Style::default()
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            },
        }
    }
}

/// Reads the persisted theme mode, defaulting to dark.
pub fn load_theme_mode(store: &dyn KeyValueStore) -> ThemeMode {
    store
        .get(THEME_KEY)
        .and_then(|v| ThemeMode::from_key(&v))
        .unwrap_or_default()
}

/// Persists the theme mode. Failures are logged, not surfaced.
pub fn persist_theme_mode(store: &dyn KeyValueStore, mode: ThemeMode) {
    if let Err(e) = store.set(THEME_KEY, mode.as_key()) {
        warn!("Failed to persist theme: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;

    #[test]
    fn toggle_cycles_between_modes() {
        assert_eq!(ThemeMode::Dark.next(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.next(), ThemeMode::Dark);
    }

    #[test]
    fn theme_round_trips_through_store() {
        let store = MemoryStore::new();
        persist_theme_mode(&store, ThemeMode::Light);
        assert_eq!(load_theme_mode(&store), ThemeMode::Light);
    }

    #[test]
    fn missing_or_garbage_theme_defaults_to_dark() {
        let store = MemoryStore::new();
        assert_eq!(load_theme_mode(&store), ThemeMode::Dark);
        store.set(THEME_KEY, "solarized").unwrap();
        assert_eq!(load_theme_mode(&store), ThemeMode::Dark);
    }
}
