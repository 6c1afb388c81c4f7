//! Screen styling configuration.
//!
//! Every widget takes its style from [`ScreenStyles`] so `--no-color` and
//! `NO_COLOR` switch the whole screen to plain text in one place.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== ScreenStyles =====

/// Styles for every part of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenStyles {
    /// Title bar.
    pub title: Style,
    /// Block headings.
    pub heading: Style,
    /// Summary panel labels.
    pub label: Style,
    /// Values that are set.
    pub value: Style,
    /// Placeholders such as `<unset>`.
    pub muted: Style,
    /// Focused row or option.
    pub focus: Style,
    /// Picked or checked rows.
    pub picked: Style,
    /// Borders.
    pub border: Style,
    /// Notice line.
    pub notice: Style,
    /// Key hints.
    pub help: Style,
}

impl ScreenStyles {
    /// Styles for `config`. With colors disabled only modifiers remain, so
    /// focus stays visible.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let reversed = Style::default().add_modifier(Modifier::REVERSED);
        if config.colors_enabled() {
            Self {
                title: bold.fg(Color::Black).bg(Color::Yellow),
                heading: bold.fg(Color::Yellow),
                label: Style::default().fg(Color::Cyan),
                value: Style::default().fg(Color::White),
                muted: Style::default().fg(Color::DarkGray),
                focus: bold.fg(Color::Black).bg(Color::LightYellow),
                picked: Style::default().fg(Color::LightGreen),
                border: Style::default().fg(Color::Yellow),
                notice: bold.fg(Color::LightMagenta),
                help: Style::default().fg(Color::DarkGray),
            }
        } else {
            Self {
                title: bold,
                heading: bold,
                label: Style::default(),
                value: Style::default(),
                muted: Style::default().add_modifier(Modifier::DIM),
                focus: reversed,
                picked: bold,
                border: Style::default(),
                notice: bold,
                help: Style::default(),
            }
        }
    }
}

impl Default for ScreenStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
