//! Terminal color themes
//!
//! Centralizes all color definitions for CLI output. Colors are emitted as
//! plain ANSI escape codes; the plain theme emits none.

use crate::config::ThemeName;

/// Standard ANSI colors used by the themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Blue,
    Cyan,
    Gray,
    DarkGray,
    White,
    Black,
    LightGreen,
    /// No escape code at all.
    None,
}

/// Color theme for conversation output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Message bodies
    pub text_primary: Color,
    /// Timestamps, footer, hints
    pub text_secondary: Color,
    /// Sender names of other participants
    pub accent: Color,
    /// Messages sent by the current user
    pub own_message: Color,
    /// Confirmation messages
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    /// Dark text for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            accent: Color::Green,
            own_message: Color::Blue,
            success: Color::Green,
        }
    }

    /// Light text for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            text_primary: Color::White,
            text_secondary: Color::Gray,
            accent: Color::LightGreen,
            own_message: Color::Cyan,
            success: Color::LightGreen,
        }
    }

    /// No colors (pipes, NO_COLOR, snapshots).
    pub fn plain() -> Self {
        Self {
            text_primary: Color::None,
            text_secondary: Color::None,
            accent: Color::None,
            own_message: Color::None,
            success: Color::None,
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Light => Self::light(),
            ThemeName::Dark => Self::dark(),
        }
    }

    pub fn primary_text(&self, text: &str) -> String {
        paint(self.text_primary, text)
    }

    pub fn secondary_text(&self, text: &str) -> String {
        paint(self.text_secondary, text)
    }

    pub fn accent_text(&self, text: &str) -> String {
        paint(self.accent, text)
    }

    pub fn own_text(&self, text: &str) -> String {
        paint(self.own_message, text)
    }

    pub fn success_text(&self, text: &str) -> String {
        paint(self.success, text)
    }
}

/// ANSI reset sequence
const ANSI_RESET: &str = "\x1b[0m";

fn color_to_ansi(color: Color) -> &'static str {
    match color {
        Color::Black => "\x1b[30m",
        Color::Green => "\x1b[32m",
        Color::Blue => "\x1b[34m",
        Color::Cyan => "\x1b[36m",
        Color::Gray => "\x1b[37m",
        Color::DarkGray => "\x1b[90m",
        Color::LightGreen => "\x1b[92m",
        Color::White => "\x1b[97m",
        Color::None => "",
    }
}

fn paint(color: Color, text: &str) -> String {
    match color {
        Color::None => text.to_string(),
        _ => format!("{}{}{}", color_to_ansi(color), text, ANSI_RESET),
    }
}

/// Whether stdout should receive color codes.
///
/// Honors the `NO_COLOR` convention and disables color when not on a TTY.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

/// Theme for stdout given the configured name.
pub fn current_theme(name: ThemeName) -> Theme {
    if colors_enabled() {
        Theme::from_name(name)
    } else {
        Theme::plain()
    }
}
