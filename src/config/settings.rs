//! User settings for comment rendering
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence.

use serde::{Deserialize, Serialize};

use crate::markdown::{MarkdownOptions, DEFAULT_MAX_DEPTH};
use crate::render::Insets;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// Rendering preferences.
///
/// This struct is serialized to JSON and persisted to the user's config directory.
/// All fields have sensible defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Appearance
    // ─────────────────────────────────────────────────────────────────────────
    /// Color theme (light or dark)
    pub theme: Theme,

    /// Body text size (in points)
    pub font_size: f32,

    /// Space above each paragraph
    pub paragraph_spacing: f32,

    /// Indent added per list nesting level
    pub list_indent: f32,

    /// Padding inside each text cell
    pub text_inset: Insets,

    // ─────────────────────────────────────────────────────────────────────────
    // Parsing
    // ─────────────────────────────────────────────────────────────────────────
    /// Deepest element nesting that is still rendered
    pub max_nesting_depth: usize,

    /// Markdown extensions enabled for parsing
    pub markdown: MarkdownOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font_size: 15.0,
            paragraph_spacing: 8.0,
            list_indent: 16.0,
            text_inset: Insets::uniform(8.0),
            max_nesting_depth: DEFAULT_MAX_DEPTH,
            markdown: MarkdownOptions::default(),
        }
    }
}

impl Settings {
    /// Minimum allowed font size
    pub const MIN_FONT_SIZE: f32 = 8.0;
    /// Maximum allowed font size
    pub const MAX_FONT_SIZE: f32 = 72.0;
    /// Maximum spacing, indent or inset
    pub const MAX_SPACING: f32 = 64.0;
    /// Minimum allowed nesting depth
    pub const MIN_NESTING_DEPTH: usize = 1;
    /// Maximum allowed nesting depth
    pub const MAX_NESTING_DEPTH: usize = 512;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        self.font_size = clamp_or(self.font_size, Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);
        self.paragraph_spacing = clamp_or(self.paragraph_spacing, 0.0, Self::MAX_SPACING);
        self.list_indent = clamp_or(self.list_indent, 0.0, Self::MAX_SPACING);

        let inset = &mut self.text_inset;
        inset.top = clamp_or(inset.top, 0.0, Self::MAX_SPACING);
        inset.left = clamp_or(inset.left, 0.0, Self::MAX_SPACING);
        inset.bottom = clamp_or(inset.bottom, 0.0, Self::MAX_SPACING);
        inset.right = clamp_or(inset.right, 0.0, Self::MAX_SPACING);

        self.max_nesting_depth = self
            .max_nesting_depth
            .clamp(Self::MIN_NESTING_DEPTH, Self::MAX_NESTING_DEPTH);
    }

    /// Load settings and sanitize them to ensure validity.
    ///
    /// This is a convenience method that deserializes and then sanitizes.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

/// Clamp `value` into `min..=max`; NaN becomes `min`.
fn clamp_or(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
