//! Settings-driven renderer
//!
//! Bundles the comrak parser, the theme style and the default extractors so
//! callers only supply the comment text and the cell width.

use crate::config::Settings;
use crate::markdown::ComrakParser;
use crate::render::{transform_with_options, DefaultExtractor, RenderBlock, RenderOptions};
use crate::style::ThemeStyle;

/// Renders comment bodies with one fixed configuration.
#[derive(Debug, Clone)]
pub struct CommentRenderer {
    parser: ComrakParser,
    style: ThemeStyle,
    extractor: DefaultExtractor,
    options: RenderOptions,
}

impl Default for CommentRenderer {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl CommentRenderer {
    /// Build a renderer from user settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            parser: ComrakParser::new(settings.markdown.clone())
                .max_depth(settings.max_nesting_depth),
            style: ThemeStyle::from_settings(settings),
            extractor: DefaultExtractor,
            options: RenderOptions {
                inset: settings.text_inset,
                max_depth: settings.max_nesting_depth,
            },
        }
    }

    /// Render a comment body for a cell `container_width` wide.
    pub fn render(&self, markdown: &str, container_width: f32) -> Vec<RenderBlock> {
        transform_with_options(
            markdown,
            container_width,
            &self.parser,
            &self.style,
            &self.extractor,
            &self.options,
        )
    }
}
