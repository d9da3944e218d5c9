//! Depth-first document walk producing render blocks.

use log::{debug, warn};

use super::block::RenderBlock;
use super::builder::BlockBuilder;
use super::extract::BlockExtractor;
use super::rules::{
    is_list, leaf_text, list_item_prefix, needs_leading_newline, task_marker, NEWLINE,
};
use super::text_block::TextBlockFactory;
use super::RenderOptions;
use crate::markdown::{Document, ElementId, ElementKind};
use crate::style::{AttributeSet, StylePolicy};

struct Walker<'a, S: ?Sized, E: ?Sized> {
    document: &'a Document,
    style: &'a S,
    extractor: &'a E,
    builder: BlockBuilder,
    max_depth: usize,
    truncated: bool,
}

impl<'a, S, E> Walker<'a, S, E>
where
    S: StylePolicy + ?Sized,
    E: BlockExtractor + ?Sized,
{
    fn travel(&mut self, id: ElementId, current: &AttributeSet, list_level: usize, depth: usize) {
        if self.truncated {
            return;
        }
        if depth > self.max_depth {
            warn!(
                "Comment nesting exceeds {} levels, rendering truncated",
                self.max_depth
            );
            self.truncated = true;
            return;
        }

        let document = self.document;
        let Some(element) = document.get(id) else {
            return;
        };

        let list_level = if is_list(&element.kind) {
            list_level + 1
        } else {
            list_level
        };
        let attributes = self
            .style
            .derive_attributes(current, &element.kind, list_level);

        if needs_leading_newline(&element.kind) {
            self.builder.push_text(NEWLINE, &attributes);
        }

        match &element.kind {
            ElementKind::Text => {
                self.builder
                    .push_text(leaf_text(document, element), &attributes);
            }
            ElementKind::LineBreak => self.builder.push_text(NEWLINE, &attributes),
            ElementKind::ListItem { task } => {
                let prefix = list_item_prefix(document, id);
                self.builder.push_text(&prefix, &attributes);
                if let Some(checked) = task {
                    self.builder.push_text(task_marker(*checked), &attributes);
                }
            }
            ElementKind::CodeBlock { .. } => {
                let block = self.extractor.code_block(document, id);
                self.builder.push_opaque(RenderBlock::Code(block));
                return;
            }
            ElementKind::Image { .. } => {
                let block = self.extractor.image(document, id);
                self.builder.push_opaque(RenderBlock::Image(block));
                return;
            }
            _ => {}
        }

        for child in &element.children {
            self.travel(*child, &attributes, list_level, depth + 1);
        }
    }
}

/// Walk `document` and collect its render blocks.
///
/// Nesting deeper than `options.max_depth` stops the walk; everything
/// gathered up to that point is still returned.
pub fn walk<S, E>(
    document: &Document,
    style: &S,
    extractor: &E,
    container_width: f32,
    options: &RenderOptions,
) -> Vec<RenderBlock>
where
    S: StylePolicy + ?Sized,
    E: BlockExtractor + ?Sized,
{
    let factory = TextBlockFactory::new(container_width, options.inset);
    let mut walker = Walker {
        document,
        style,
        extractor,
        builder: BlockBuilder::new(factory),
        max_depth: options.max_depth.max(1),
        truncated: false,
    };

    let base = style.base_attributes();
    for root in document.roots() {
        walker.travel(*root, &base, 0, 1);
    }

    let blocks = walker.builder.finish();
    debug!(
        "Rendered {} elements into {} blocks",
        document.len(),
        blocks.len()
    );
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::extract::DefaultExtractor;
    use crate::style::StyleFn;
    use pretty_assertions::assert_eq;

    fn plain_style() -> StyleFn<impl Fn(&AttributeSet, &ElementKind, usize) -> AttributeSet> {
        StyleFn::new(AttributeSet::default(), |current: &AttributeSet, _: &ElementKind, _| {
            current.clone()
        })
    }

    fn texts(blocks: &[RenderBlock]) -> Vec<String> {
        blocks
            .iter()
            .map(|block| match block {
                RenderBlock::Text(text) => text.text(),
                RenderBlock::Code(code) => format!("code:{}", code.text),
                RenderBlock::Image(image) => format!("image:{}", image.url),
            })
            .collect()
    }

    fn walk_plain(document: &Document) -> Vec<RenderBlock> {
        walk(
            document,
            &plain_style(),
            &DefaultExtractor,
            300.0,
            &RenderOptions::default(),
        )
    }

    #[test]
    fn test_paragraphs_are_separated_by_newlines() {
        let source = "one\n\ntwo";
        let mut doc = Document::new(source);
        let first = doc.add_element(None, ElementKind::Paragraph, 0..3);
        doc.add_element(Some(first), ElementKind::Text, 0..3);
        let second = doc.add_element(None, ElementKind::Paragraph, 5..8);
        doc.add_element(Some(second), ElementKind::Text, 5..8);

        assert_eq!(texts(&walk_plain(&doc)), vec!["one\ntwo"]);
    }

    #[test]
    fn test_unknown_kinds_still_visit_children() {
        let source = "| x |";
        let mut doc = Document::new(source);
        let table = doc.add_element(None, ElementKind::Table, 0..5);
        let row = doc.add_element(Some(table), ElementKind::TableRow { header: true }, 0..5);
        let cell = doc.add_element(Some(row), ElementKind::TableCell, 1..4);
        doc.add_element(Some(cell), ElementKind::Text, 2..3);

        assert_eq!(texts(&walk_plain(&doc)), vec!["x"]);
    }

    #[test]
    fn test_opaque_children_are_not_visited() {
        let source = "![alt](u.png)";
        let mut doc = Document::new(source);
        let image = doc.add_element(
            None,
            ElementKind::Image {
                url: "u.png".to_string(),
                title: String::new(),
            },
            0..13,
        );
        doc.add_element(Some(image), ElementKind::Text, 2..5);

        let blocks = walk_plain(&doc);
        assert_eq!(texts(&blocks), vec!["", "image:u.png"]);
    }

    #[test]
    fn test_prefix_uses_item_attributes() {
        let source = "- a";
        let mut doc = Document::new(source);
        let list = doc.add_element(None, ElementKind::BulletedList, 0..3);
        let item = doc.add_element(Some(list), ElementKind::ListItem { task: None }, 0..3);
        doc.add_element(Some(item), ElementKind::Text, 2..3);

        let style = StyleFn::new(
            AttributeSet::default(),
            |current: &AttributeSet, kind: &ElementKind, level: usize| {
                let mut next = current.clone();
                if matches!(kind, ElementKind::BulletedList) {
                    next.paragraph.head_indent = level as f32 * 10.0;
                }
                next
            },
        );

        let blocks = walk(&doc, &style, &DefaultExtractor, 100.0, &RenderOptions::default());
        let text = blocks[0].as_text().unwrap();
        assert_eq!(text.text(), "\u{2022} a");
        assert!(text
            .runs
            .iter()
            .all(|run| run.attributes.paragraph.head_indent == 10.0));
    }

    #[test]
    fn test_depth_limit_keeps_content_before_cutoff() {
        let source = "a b";
        let mut doc = Document::new(source);
        let para = doc.add_element(None, ElementKind::Paragraph, 0..3);
        doc.add_element(Some(para), ElementKind::Text, 0..1);
        let strong = doc.add_element(Some(para), ElementKind::Strong, 2..3);
        let emphasis = doc.add_element(Some(strong), ElementKind::Emphasis, 2..3);
        doc.add_element(Some(emphasis), ElementKind::Text, 2..3);

        let options = RenderOptions {
            max_depth: 2,
            ..RenderOptions::default()
        };
        let blocks = walk(&doc, &plain_style(), &DefaultExtractor, 100.0, &options);
        assert_eq!(texts(&blocks), vec!["a"]);
    }
}
