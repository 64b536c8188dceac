//! Color palette for the screens.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub breathe: Color,
    pub hold: Color,
    pub text: Color,
    pub dim: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            breathe: Color::Cyan,
            hold: Color::Magenta,
            text: Color::White,
            dim: Color::DarkGray,
            border: Color::DarkGray,
        }
    }
}
