//! Markdown to render-block transformation
//!
//! [`transform`] is the entry point: it parses a comment body, walks the
//! element tree depth-first and returns text, code and image blocks in
//! document order. Inline content between two opaque blocks is merged into
//! a single [`TextBlock`].
//!
//! Parsing failures never reach the caller. A comment that cannot be parsed
//! renders as no blocks at all.
//!
//! # Example
//! ```ignore
//! use comment_blocks::markdown::ComrakParser;
//! use comment_blocks::render::{transform, DefaultExtractor};
//! use comment_blocks::style::ThemeStyle;
//! use comment_blocks::theme::ThemeColors;
//!
//! let style = ThemeStyle::new(ThemeColors::light(), 15.0);
//! let blocks = transform("- a\n- b", 375.0, &ComrakParser::default(), &style, &DefaultExtractor);
//! assert_eq!(blocks.len(), 1);
//! ```

mod block;
mod builder;
mod extract;
mod rules;
mod text_block;
mod walker;

pub use block::{CodeBlock, ImageBlock, Insets, RenderBlock, StyledRun, TextBlock};
pub use builder::BlockBuilder;
pub use extract::{BlockExtractor, DefaultExtractor};
pub use rules::{list_item_prefix, needs_leading_newline, BULLET};
pub use text_block::{trim_runs, TextBlockFactory};
pub use walker::walk;

use crate::error::ResultExt;
use crate::markdown::{MarkdownParser, DEFAULT_MAX_DEPTH};
use crate::style::StylePolicy;

/// Layout and safety parameters of a transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Inset copied into every text block
    pub inset: Insets,
    /// Nesting depth at which the walk stops
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            inset: Insets::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Turn a markdown comment body into render blocks.
pub fn transform<P, S, E>(
    markdown: &str,
    container_width: f32,
    parser: &P,
    style: &S,
    extractor: &E,
) -> Vec<RenderBlock>
where
    P: MarkdownParser + ?Sized,
    S: StylePolicy + ?Sized,
    E: BlockExtractor + ?Sized,
{
    transform_with_options(
        markdown,
        container_width,
        parser,
        style,
        extractor,
        &RenderOptions::default(),
    )
}

/// [`transform`] with explicit insets and depth limit.
pub fn transform_with_options<P, S, E>(
    markdown: &str,
    container_width: f32,
    parser: &P,
    style: &S,
    extractor: &E,
    options: &RenderOptions,
) -> Vec<RenderBlock>
where
    P: MarkdownParser + ?Sized,
    S: StylePolicy + ?Sized,
    E: BlockExtractor + ?Sized,
{
    parser
        .parse(markdown)
        .map(|document| walk(&document, style, extractor, container_width, options))
        .unwrap_or_warn_default(Vec::new(), "Failed to parse comment")
}
