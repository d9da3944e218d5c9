//! Resolved text attributes
//!
//! An [`AttributeSet`] is the formatting in effect at one point of the
//! document tree. It is a plain value: deriving a child's attributes clones
//! the parent's set and changes the copy.

use serde::Serialize;

use crate::theme::Color;

/// Font family class; concrete font choice is up to the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Proportional,
    Monospace,
}

/// Font request for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontSpec {
    pub family: FontFamily,
    /// Point size
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl FontSpec {
    /// Regular proportional font of the given size.
    pub fn proportional(size: f32) -> Self {
        Self {
            family: FontFamily::Proportional,
            size,
            bold: false,
            italic: false,
        }
    }

    /// Regular monospace font of the given size.
    pub fn monospace(size: f32) -> Self {
        Self {
            family: FontFamily::Monospace,
            ..Self::proportional(size)
        }
    }
}

/// Paragraph-level layout attributes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ParagraphStyle {
    /// Space above each paragraph
    pub spacing_before: f32,
    /// Indent of the first line of each paragraph
    pub first_line_head_indent: f32,
    /// Indent of the remaining lines
    pub head_indent: f32,
}

/// The formatting applied to a styled run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeSet {
    pub font: FontSpec,
    pub foreground: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    pub paragraph: ParagraphStyle,
    pub strikethrough: bool,
    pub underline: bool,
    /// Vertical offset from the baseline, positive is raised
    pub baseline_offset: f32,
    /// Link target when the run is part of a link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self {
            font: FontSpec::proportional(15.0),
            foreground: Color::from_rgb(0, 0, 0),
            background: None,
            paragraph: ParagraphStyle::default(),
            strikethrough: false,
            underline: false,
            baseline_offset: 0.0,
            link: None,
        }
    }
}
