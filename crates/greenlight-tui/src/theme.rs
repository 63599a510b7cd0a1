//! Color theme for the terminal frontend.

use ratatui::style::Color;

/// Colors used across the frontend.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Body text.
    pub text: Color,
    /// Secondary text (detail labels, hints).
    pub muted: Color,
    /// Frame and title accents.
    pub accent: Color,
    /// Approve button, success notices.
    pub success: Color,
    /// Deny button, failure notices.
    pub error: Color,
    /// Expired status.
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
        }
    }
}
