//! Shared styles for the carousel views.
//!
//! Colors can be disabled via the `--no-color` CLI flag or the `NO_COLOR`
//! environment variable; the palette then falls back to modifiers that
//! survive a monochrome terminal.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Resolve from the CLI flag and the environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Whether colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Palette =====

/// Style table for the carousel views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Accented foreground for titles and active elements.
    pub accent: Style,
    /// Muted foreground for secondary metadata and hints.
    pub muted: Style,
    /// Error notices.
    pub error: Style,
    /// Kind badge on the metadata card.
    pub badge: Style,
    /// Disabled navigation arrows.
    pub disabled: Style,
    /// Loading indicator while a page fetch is in flight.
    pub loading: Style,
    /// Block cursor in the search bar.
    pub cursor: Style,
}

impl Palette {
    /// Palette honoring the environment's color preference.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }

    /// Palette for an explicit color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                accent: Style::new().fg(Color::Cyan),
                muted: Style::new().fg(Color::DarkGray),
                error: Style::new().fg(Color::Red),
                badge: Style::new().fg(Color::Black).bg(Color::Cyan),
                disabled: Style::new().fg(Color::DarkGray).add_modifier(Modifier::DIM),
                loading: Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                cursor: Style::new()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                accent: Style::new().add_modifier(Modifier::BOLD),
                muted: Style::new().add_modifier(Modifier::DIM),
                error: Style::new().add_modifier(Modifier::BOLD),
                badge: Style::new().add_modifier(Modifier::REVERSED),
                disabled: Style::new().add_modifier(Modifier::DIM),
                loading: Style::new().add_modifier(Modifier::BOLD),
                cursor: Style::new().add_modifier(Modifier::REVERSED),
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

// ===== Tests =====
