//! Markdown parsing module
//!
//! Parsing is a collaborator of the renderer, not part of it: the renderer
//! only sees the [`Document`] model and the [`MarkdownParser`] seam. The
//! bundled [`ComrakParser`] covers CommonMark plus the GitHub-flavoured
//! extensions (tables, strikethrough, autolinks, task lists).
//!
//! # Example
//! ```ignore
//! use comment_blocks::markdown::{parse_markdown, ElementKind};
//!
//! let doc = parse_markdown("- a\n- b")?;
//! assert_eq!(doc.element(doc.roots()[0]).kind, ElementKind::BulletedList);
//! ```

mod document;
mod parser;

pub use document::{Document, Element, ElementId, ElementKind, HeadingLevel};
pub use parser::{parse_markdown, ComrakParser, MarkdownOptions, MarkdownParser, DEFAULT_MAX_DEPTH};
