//! Terminal colors for highlighted expressions.

use colored::{Color, ColoredString, Colorize};
use log::warn;
use spel_core::{Token, TokenType};

#[derive(Debug, Clone, Copy)]
pub struct SyntaxTheme {
    pub method_color: Color,
    pub string_color: Color,
    pub number_color: Color,
    pub punctuation_color: Color,
    pub plain_color: Color,
}

impl Default for SyntaxTheme {
    fn default() -> Self {
        Self::dark_theme()
    }
}

impl SyntaxTheme {
    pub fn dark_theme() -> Self {
        Self {
            method_color: rgb(86, 156, 214),      // Blue
            string_color: rgb(206, 145, 120),     // Light brown
            number_color: rgb(181, 206, 168),     // Light green
            punctuation_color: rgb(255, 215, 0),  // Gold
            plain_color: rgb(212, 212, 212),      // Light gray
        }
    }

    pub fn light_theme() -> Self {
        Self {
            method_color: rgb(0, 0, 255),         // Blue
            string_color: rgb(163, 21, 21),       // Dark red
            number_color: rgb(9, 134, 88),        // Dark green
            punctuation_color: rgb(0, 0, 0),      // Black
            plain_color: rgb(1, 1, 1),            // Almost black
        }
    }

    /// Unknown names fall back to the dark theme.
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light_theme(),
            "dark" => Self::dark_theme(),
            other => {
                warn!("unknown theme '{}', using dark", other);
                Self::dark_theme()
            }
        }
    }

    fn color(&self, token_type: TokenType) -> Color {
        match token_type {
            TokenType::Method => self.method_color,
            literal if literal.is_literal() => self.string_color,
            TokenType::Number => self.number_color,
            TokenType::Punctuation => self.punctuation_color,
            _ => self.plain_color,
        }
    }

    pub fn paint(&self, token: &Token) -> ColoredString {
        let painted = token.text.as_str().color(self.color(token.token_type));
        match token.token_type {
            TokenType::Method => painted.bold(),
            _ => painted,
        }
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::TrueColor { r, g, b }
}
