//! Style types for highlighted text
//!
//! This module provides the display-attribute vocabulary attached to
//! highlighted spans. The engine itself only hands out [`ScopeId`]s; hosts
//! resolve them to a [`Style`] through the rule table and, for terminal
//! hosts, to a crossterm content style.

use crate::rules::ScopeId;

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// Parse a color from a string name (for TOML grammar loading)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Color::Default),
            "black" => Some(Color::Black),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "blue" => Some(Color::Blue),
            "magenta" => Some(Color::Magenta),
            "cyan" => Some(Color::Cyan),
            "white" => Some(Color::White),
            "bright-black" => Some(Color::BrightBlack),
            "bright-red" => Some(Color::BrightRed),
            "bright-green" => Some(Color::BrightGreen),
            "bright-yellow" => Some(Color::BrightYellow),
            "bright-blue" => Some(Color::BrightBlue),
            "bright-magenta" => Some(Color::BrightMagenta),
            "bright-cyan" => Some(Color::BrightCyan),
            "bright-white" => Some(Color::BrightWhite),
            _ => None,
        }
    }
}

/// Map to the crossterm palette; `Default` means "leave unset"
fn terminal_color(color: Color) -> Option<crossterm::style::Color> {
    use crossterm::style::Color as Ct;
    match color {
        Color::Default => None,
        Color::Black => Some(Ct::Black),
        Color::Red => Some(Ct::DarkRed),
        Color::Green => Some(Ct::DarkGreen),
        Color::Yellow => Some(Ct::DarkYellow),
        Color::Blue => Some(Ct::DarkBlue),
        Color::Magenta => Some(Ct::DarkMagenta),
        Color::Cyan => Some(Ct::DarkCyan),
        Color::White => Some(Ct::Grey),
        Color::BrightBlack => Some(Ct::DarkGrey),
        Color::BrightRed => Some(Ct::Red),
        Color::BrightGreen => Some(Ct::Green),
        Color::BrightYellow => Some(Ct::Yellow),
        Color::BrightBlue => Some(Ct::Blue),
        Color::BrightMagenta => Some(Ct::Magenta),
        Color::BrightCyan => Some(Ct::Cyan),
        Color::BrightWhite => Some(Ct::White),
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Create a style with just background color
    pub fn bg(color: Color) -> Self {
        Self {
            bg: color,
            ..Default::default()
        }
    }

    /// Builder: set foreground color
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Convert to a crossterm content style for terminal rendering
    pub fn content_style(&self) -> crossterm::style::ContentStyle {
        use crossterm::style::{Attribute, ContentStyle};

        let mut style = ContentStyle::new();
        style.foreground_color = terminal_color(self.fg);
        style.background_color = terminal_color(self.bg);
        if self.bold {
            style.attributes.set(Attribute::Bold);
        }
        if self.italic {
            style.attributes.set(Attribute::Italic);
        }
        if self.underline {
            style.attributes.set(Attribute::Underlined);
        }
        style
    }
}

/// A styled span of text within a line
///
/// Spans are byte intervals; the attribute scope is resolved to a style
/// through the rule table that produced the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Attribute scope that styles this span
    pub scope: ScopeId,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, scope: ScopeId) -> Self {
        Self { start, end, scope }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
