//! Theme palettes for rendered comments
//!
//! This module defines the colors and spacing the default style policy
//! draws from. The `Theme` enum in `config` (Light/Dark) selects which
//! palette is used.
//!
//! # Usage
//!
//! ```ignore
//! use comment_blocks::config::Theme;
//! use comment_blocks::theme::ThemeColors;
//!
//! let colors = ThemeColors::from_theme(Theme::Dark);
//! assert!(colors.is_dark());
//! ```

use std::fmt;

use serde::Serialize;

use crate::config::Theme;

// ─────────────────────────────────────────────────────────────────────────────
// Color
// ─────────────────────────────────────────────────────────────────────────────

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::from_rgba(0, 0, 0, 0);

    /// Opaque color from red, green and blue.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from red, green, blue and alpha.
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    pub fn a(&self) -> u8 {
        self.a
    }
}

impl fmt::Display for Color {
    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Theme Colors
// ─────────────────────────────────────────────────────────────────────────────

/// All colors used when styling comment text.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    /// Background colors
    pub base: BaseColors,
    /// Text colors for various contexts
    pub text: TextColors,
    /// Colors for markdown constructs
    pub markdown: MarkdownColors,
}

impl ThemeColors {
    /// Create theme colors for the given theme variant.
    pub fn from_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }

    /// Get the light theme colors.
    pub fn light() -> Self {
        Self {
            base: BaseColors::light(),
            text: TextColors::light(),
            markdown: MarkdownColors::light(),
        }
    }

    /// Get the dark theme colors.
    pub fn dark() -> Self {
        Self {
            base: BaseColors::dark(),
            text: TextColors::dark(),
            markdown: MarkdownColors::dark(),
        }
    }

    /// Check if this is a dark theme.
    pub fn is_dark(&self) -> bool {
        self.base.background.r() < 128
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Base Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Background colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseColors {
    /// Comment cell background
    pub background: Color,
    /// Background behind inline code
    pub code_background: Color,
}

impl BaseColors {
    /// Light theme base colors.
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            code_background: Color::from_rgb(233, 236, 239),
        }
    }

    /// Dark theme base colors.
    pub fn dark() -> Self {
        Self {
            background: Color::from_rgb(30, 30, 30),
            code_background: Color::from_rgb(35, 39, 46),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Text colors for various contexts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColors {
    /// Body text
    pub primary: Color,
    /// Muted text (struck-through content)
    pub muted: Color,
    /// Link text
    pub link: Color,
    /// Inline code text
    pub code: Color,
}

impl TextColors {
    /// Light theme text colors.
    pub fn light() -> Self {
        Self {
            primary: Color::from_rgb(30, 30, 30),
            muted: Color::from_rgb(120, 120, 120),
            link: Color::from_rgb(0, 100, 180),
            code: Color::from_rgb(80, 80, 80),
        }
    }

    /// Dark theme text colors.
    pub fn dark() -> Self {
        Self {
            primary: Color::from_rgb(220, 220, 220),
            muted: Color::from_rgb(140, 140, 140),
            link: Color::from_rgb(100, 180, 255),
            code: Color::from_rgb(200, 200, 150),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Markdown Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Colors for markdown constructs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkdownColors {
    /// Heading text (H1-H6)
    pub heading: Color,
    /// Block quote text
    pub blockquote_text: Color,
}

impl MarkdownColors {
    /// Light theme markdown colors.
    pub fn light() -> Self {
        Self {
            heading: Color::from_rgb(0, 100, 180),
            blockquote_text: Color::from_rgb(100, 100, 100),
        }
    }

    /// Dark theme markdown colors.
    pub fn dark() -> Self {
        Self {
            heading: Color::from_rgb(100, 180, 255),
            blockquote_text: Color::from_rgb(180, 180, 180),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Theme Spacing
// ─────────────────────────────────────────────────────────────────────────────

/// Spacing values for consistent layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeSpacing {
    /// Medium spacing (8px), between paragraphs
    pub md: f32,
    /// Large spacing (16px), for indents
    pub lg: f32,
}

impl Default for ThemeSpacing {
    fn default() -> Self {
        Self { md: 8.0, lg: 16.0 }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
