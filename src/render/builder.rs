//! Output accumulator for one transform.

use super::block::{RenderBlock, StyledRun};
use super::text_block::{trim_runs, TextBlockFactory};
use crate::style::AttributeSet;

/// Collects pending styled text and the finished block list.
///
/// Pending text becomes a [`RenderBlock::Text`] when an opaque block is
/// pushed or when the builder is finished.
#[derive(Debug)]
pub struct BlockBuilder {
    factory: TextBlockFactory,
    pending: Vec<StyledRun>,
    blocks: Vec<RenderBlock>,
}

impl BlockBuilder {
    pub fn new(factory: TextBlockFactory) -> Self {
        Self {
            factory,
            pending: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Append text to the pending run sequence.
    ///
    /// Text with the same attributes as the previous run extends that run.
    pub fn push_text(&mut self, text: &str, attributes: &AttributeSet) {
        if text.is_empty() {
            return;
        }
        match self.pending.last_mut() {
            Some(last) if last.attributes == *attributes => last.text.push_str(text),
            _ => self.pending.push(StyledRun::new(text, attributes.clone())),
        }
    }

    /// Flush pending text, then append an opaque block.
    ///
    /// The flush happens even when the pending text trims to nothing, so an
    /// opaque block is always preceded by a text block.
    pub fn push_opaque(&mut self, block: RenderBlock) {
        self.flush();
        self.blocks.push(block);
    }

    /// Flush remaining text if it has visible content and return the blocks.
    pub fn finish(mut self) -> Vec<RenderBlock> {
        let runs = trim_runs(std::mem::take(&mut self.pending));
        if !runs.is_empty() {
            self.blocks.push(RenderBlock::Text(self.factory.finalize(runs)));
        }
        self.blocks
    }

    fn flush(&mut self) {
        let runs = std::mem::take(&mut self.pending);
        self.blocks.push(RenderBlock::Text(self.factory.finalize(runs)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::block::{CodeBlock, Insets};

    fn builder() -> BlockBuilder {
        BlockBuilder::new(TextBlockFactory::new(200.0, Insets::default()))
    }

    fn code(text: &str) -> RenderBlock {
        RenderBlock::Code(CodeBlock {
            text: text.to_string(),
            language: None,
        })
    }

    #[test]
    fn test_equal_attributes_coalesce() {
        let mut builder = builder();
        let attributes = AttributeSet::default();
        builder.push_text("a", &attributes);
        builder.push_text("b", &attributes);

        let blocks = builder.finish();
        let text = blocks[0].as_text().unwrap();
        assert_eq!(text.runs.len(), 1);
        assert_eq!(text.text(), "ab");
    }

    #[test]
    fn test_different_attributes_stay_separate() {
        let mut builder = builder();
        let plain = AttributeSet::default();
        let mut bold = plain.clone();
        bold.font.bold = true;

        builder.push_text("a", &plain);
        builder.push_text("b", &bold);

        let blocks = builder.finish();
        assert_eq!(blocks[0].as_text().unwrap().runs.len(), 2);
    }

    #[test]
    fn test_empty_text_is_ignored() {
        let mut builder = builder();
        builder.push_text("", &AttributeSet::default());
        builder.push_opaque(code("x"));

        let blocks = builder.finish();
        assert!(blocks[0].as_text().unwrap().runs.is_empty());
    }

    #[test]
    fn test_opaque_block_flushes_even_when_empty() {
        let mut builder = builder();
        builder.push_text("\n", &AttributeSet::default());
        builder.push_opaque(code("x"));

        let blocks = builder.finish();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].as_text().unwrap().is_empty());
        assert_eq!(blocks[1], code("x"));
    }

    #[test]
    fn test_finish_skips_blank_tail() {
        let mut builder = builder();
        builder.push_text("before", &AttributeSet::default());
        builder.push_opaque(code("x"));
        builder.push_text("\n  ", &AttributeSet::default());

        let blocks = builder.finish();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].as_text().unwrap().text(), "before");
    }
}
