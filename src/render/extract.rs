//! Opaque block extraction
//!
//! Code blocks and images are not decomposed into styled runs. An extractor
//! builds their render blocks straight from the parsed element.

use super::block::{CodeBlock, ImageBlock};
use crate::markdown::{Document, ElementId, ElementKind};

/// Builds opaque render blocks from parsed elements.
pub trait BlockExtractor {
    fn code_block(&self, document: &Document, id: ElementId) -> CodeBlock;
    fn image(&self, document: &Document, id: ElementId) -> ImageBlock;
}

/// Extractor reading the data the parser stores on each element.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultExtractor;

impl BlockExtractor for DefaultExtractor {
    fn code_block(&self, document: &Document, id: ElementId) -> CodeBlock {
        let element = document.element(id);
        match &element.kind {
            ElementKind::CodeBlock { info, literal } => CodeBlock {
                text: literal.trim_end_matches('\n').to_string(),
                language: info
                    .split_whitespace()
                    .next()
                    .map(str::to_string),
            },
            _ => CodeBlock {
                text: document.text_at(&element.range).to_string(),
                language: None,
            },
        }
    }

    fn image(&self, document: &Document, id: ElementId) -> ImageBlock {
        let element = document.element(id);
        let alt = Some(document.text_content(id)).filter(|alt| !alt.is_empty());
        match &element.kind {
            ElementKind::Image { url, title } => ImageBlock {
                url: url.clone(),
                alt,
                title: Some(title.clone()).filter(|title| !title.is_empty()),
            },
            _ => ImageBlock {
                url: document.text_at(&element.range).to_string(),
                alt,
                title: None,
            },
        }
    }
}
