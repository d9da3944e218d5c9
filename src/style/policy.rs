//! Style policies
//!
//! A [`StylePolicy`] decides which attributes each element kind pushes on
//! top of the inherited ones. The renderer calls it once per element and
//! never looks at concrete style values itself.

use crate::config::Settings;
use crate::markdown::{ElementKind, HeadingLevel};
use crate::theme::{ThemeColors, ThemeSpacing};

use super::attributes::{AttributeSet, FontFamily, FontSpec, ParagraphStyle};

// ─────────────────────────────────────────────────────────────────────────────
// Policy Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Supplies the attributes for body text and for every element kind.
pub trait StylePolicy {
    /// Attributes for top-level body text.
    fn base_attributes(&self) -> AttributeSet;

    /// Attributes for an element of `kind` nested in text styled `current`.
    ///
    /// `list_level` already counts the element itself when it is a list.
    /// Must be total: kinds without styling return `current` unchanged.
    fn derive_attributes(
        &self,
        current: &AttributeSet,
        kind: &ElementKind,
        list_level: usize,
    ) -> AttributeSet;
}

/// A policy built from a base attribute set and a derive function.
pub struct StyleFn<F> {
    base: AttributeSet,
    derive: F,
}

impl<F> StyleFn<F>
where
    F: Fn(&AttributeSet, &ElementKind, usize) -> AttributeSet,
{
    pub fn new(base: AttributeSet, derive: F) -> Self {
        Self { base, derive }
    }
}

impl<F> StylePolicy for StyleFn<F>
where
    F: Fn(&AttributeSet, &ElementKind, usize) -> AttributeSet,
{
    fn base_attributes(&self) -> AttributeSet {
        self.base.clone()
    }

    fn derive_attributes(
        &self,
        current: &AttributeSet,
        kind: &ElementKind,
        list_level: usize,
    ) -> AttributeSet {
        (self.derive)(current, kind, list_level)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Theme Policy
// ─────────────────────────────────────────────────────────────────────────────

/// The default policy, driven by a theme palette and a body font size.
#[derive(Debug, Clone)]
pub struct ThemeStyle {
    colors: ThemeColors,
    spacing: ThemeSpacing,
    font_size: f32,
    paragraph_spacing: f32,
    list_indent: f32,
}

impl ThemeStyle {
    /// Create a policy with default spacing.
    pub fn new(colors: ThemeColors, font_size: f32) -> Self {
        let spacing = ThemeSpacing::default();
        Self {
            colors,
            font_size,
            paragraph_spacing: spacing.md,
            list_indent: spacing.lg,
            spacing,
        }
    }

    /// Build the policy described by user settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(ThemeColors::from_theme(settings.theme), settings.font_size)
            .paragraph_spacing(settings.paragraph_spacing)
            .list_indent(settings.list_indent)
    }

    /// Space above each paragraph.
    #[must_use]
    pub fn paragraph_spacing(mut self, spacing: f32) -> Self {
        self.paragraph_spacing = spacing;
        self
    }

    /// Indent added per list nesting level.
    #[must_use]
    pub fn list_indent(mut self, indent: f32) -> Self {
        self.list_indent = indent;
        self
    }

    fn heading_size(&self, level: HeadingLevel) -> f32 {
        match level {
            HeadingLevel::H1 => self.font_size * 2.0,
            HeadingLevel::H2 => self.font_size * 1.75,
            HeadingLevel::H3 => self.font_size * 1.5,
            HeadingLevel::H4 => self.font_size * 1.25,
            HeadingLevel::H5 => self.font_size * 1.1,
            HeadingLevel::H6 => self.font_size,
        }
    }
}

impl StylePolicy for ThemeStyle {
    fn base_attributes(&self) -> AttributeSet {
        AttributeSet {
            font: FontSpec::proportional(self.font_size),
            foreground: self.colors.text.primary,
            background: Some(self.colors.base.background),
            paragraph: ParagraphStyle {
                spacing_before: self.paragraph_spacing,
                ..ParagraphStyle::default()
            },
            ..AttributeSet::default()
        }
    }

    fn derive_attributes(
        &self,
        current: &AttributeSet,
        kind: &ElementKind,
        list_level: usize,
    ) -> AttributeSet {
        let mut attributes = current.clone();

        match kind {
            ElementKind::Strong => attributes.font.bold = true,
            ElementKind::Emphasis => attributes.font.italic = true,
            ElementKind::Strikethrough => {
                attributes.strikethrough = true;
                attributes.foreground = self.colors.text.muted;
            }
            ElementKind::Superscript => {
                let size = current.font.size;
                attributes.font.size = size * 0.75;
                attributes.baseline_offset += size * 0.33;
            }
            ElementKind::CodeSpan => {
                attributes.font.family = FontFamily::Monospace;
                attributes.font.size = current.font.size * 0.9;
                attributes.foreground = self.colors.text.code;
                attributes.background = Some(self.colors.base.code_background);
            }
            ElementKind::Header { level } => {
                attributes.font.size = self.heading_size(*level);
                attributes.font.bold = true;
                attributes.foreground = self.colors.markdown.heading;
            }
            ElementKind::Link { url, .. } => {
                attributes.foreground = self.colors.text.link;
                attributes.underline = true;
                attributes.link = Some(url.clone());
            }
            ElementKind::BlockQuote => {
                attributes.foreground = self.colors.markdown.blockquote_text;
                attributes.paragraph.head_indent += self.spacing.lg;
                attributes.paragraph.first_line_head_indent += self.spacing.lg;
            }
            ElementKind::BulletedList | ElementKind::NumberedList { .. } => {
                let indent = list_level as f32 * self.list_indent;
                attributes.paragraph.head_indent = indent;
                attributes.paragraph.first_line_head_indent = indent;
            }
            ElementKind::TableRow { header: true } => attributes.font.bold = true,
            _ => {}
        }

        attributes
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
