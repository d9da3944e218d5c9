//! Markdown parser implementation using comrak
//!
//! This module wraps comrak's parser and converts its arena AST into the
//! crate's own [`Document`] model: byte ranges instead of line/column
//! positions, list positions precomputed, and list items shaped the way the
//! renderer expects (the paragraph that carries an item's first line is
//! folded into the item).

use std::ops::Range;

use comrak::{
    nodes::{AstNode, ListType as ComrakListType, NodeValue},
    parse_document, Arena, Options,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::document::{Document, ElementId, ElementKind, HeadingLevel};
use crate::error::Result;
use crate::string_utils::{slice_range, snap_range};

/// Nesting depth used when no explicit limit is configured.
pub const DEFAULT_MAX_DEPTH: usize = 128;

// ─────────────────────────────────────────────────────────────────────────────
// Public Types
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for markdown parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    /// Enable GitHub Flavored Markdown tables
    pub tables: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub strikethrough: bool,
    /// Enable autolink URLs and emails
    pub autolink: bool,
    /// Enable task lists (- [ ] and - [x])
    pub tasklist: bool,
    /// Enable superscript (^text^)
    pub superscript: bool,
    /// Enable footnotes
    pub footnotes: bool,
    /// Enable description lists
    pub description_lists: bool,
    /// Enable front matter (YAML/TOML) with the given delimiter
    pub front_matter_delimiter: Option<String>,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
            superscript: false,
            footnotes: false,
            description_lists: false,
            front_matter_delimiter: None,
        }
    }
}

impl MarkdownOptions {
    /// Convert to comrak Options.
    fn to_comrak_options(&self) -> Options {
        let mut options = Options::default();

        options.extension.strikethrough = self.strikethrough;
        options.extension.table = self.tables;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;
        options.extension.superscript = self.superscript;
        options.extension.footnotes = self.footnotes;
        options.extension.description_lists = self.description_lists;
        options.extension.front_matter_delimiter = self.front_matter_delimiter.clone();

        options
    }
}

/// Something that turns markdown text into a [`Document`].
pub trait MarkdownParser {
    /// Parse `markdown`, or report why it could not be parsed.
    fn parse(&self, markdown: &str) -> Result<Document>;
}

/// [`MarkdownParser`] backed by comrak.
#[derive(Debug, Clone)]
pub struct ComrakParser {
    options: MarkdownOptions,
    max_depth: usize,
}

impl Default for ComrakParser {
    fn default() -> Self {
        Self::new(MarkdownOptions::default())
    }
}

impl ComrakParser {
    /// Create a parser with the given options.
    pub fn new(options: MarkdownOptions) -> Self {
        Self {
            options,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how deeply nested elements may be before they are dropped.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }
}

impl MarkdownParser for ComrakParser {
    fn parse(&self, markdown: &str) -> Result<Document> {
        let arena = Arena::new();
        let comrak_options = self.options.to_comrak_options();

        let root = parse_document(&arena, markdown, &comrak_options);

        let mut converter = Converter::new(markdown, self.max_depth);
        for child in root.children() {
            converter.convert_node(child, None, 1);
        }

        debug!(
            "Parsed {} bytes of markdown into {} elements",
            markdown.len(),
            converter.document.len()
        );
        Ok(converter.document)
    }
}

/// Parse markdown text with the default options.
///
/// # Example
/// ```ignore
/// let doc = parse_markdown("# Hello\n\nWorld")?;
/// assert_eq!(doc.roots().len(), 2);
/// ```
pub fn parse_markdown(markdown: &str) -> Result<Document> {
    ComrakParser::default().parse(markdown)
}

// ─────────────────────────────────────────────────────────────────────────────
// Source Positions
// ─────────────────────────────────────────────────────────────────────────────

/// Maps comrak's 1-based line/column positions onto byte offsets.
struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, byte)| *byte == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    fn offset(&self, line: usize, column: usize) -> Option<usize> {
        if line == 0 || column == 0 {
            return None;
        }
        self.line_starts
            .get(line - 1)
            .map(|start| start + column - 1)
    }

    /// Byte range for an inclusive `start..=end` position pair.
    fn range(&self, source: &str, start: (usize, usize), end: (usize, usize)) -> Range<usize> {
        match (self.offset(start.0, start.1), self.offset(end.0, end.1)) {
            (Some(start), Some(end)) => snap_range(source, start..end + 1),
            (Some(start), None) => snap_range(source, start..start),
            _ => 0..0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal Conversion
// ─────────────────────────────────────────────────────────────────────────────

struct Converter<'s> {
    source: &'s str,
    index: LineIndex,
    document: Document,
    /// End of the last text literal placed in the source.
    text_cursor: usize,
    max_depth: usize,
    truncated: bool,
}

impl<'s> Converter<'s> {
    fn new(source: &'s str, max_depth: usize) -> Self {
        Self {
            source,
            index: LineIndex::new(source),
            document: Document::new(source),
            text_cursor: 0,
            max_depth,
            truncated: false,
        }
    }

    fn convert_children<'a>(&mut self, node: &'a AstNode<'a>, parent: ElementId, depth: usize) {
        for child in node.children() {
            self.convert_node(child, Some(parent), depth);
        }
    }

    fn convert_node<'a>(&mut self, node: &'a AstNode<'a>, parent: Option<ElementId>, depth: usize) {
        if depth > self.max_depth {
            if !self.truncated {
                warn!(
                    "Markdown nesting exceeds {} levels, dropping deeper content",
                    self.max_depth
                );
                self.truncated = true;
            }
            return;
        }

        let ast = node.data.borrow();
        let sourcepos = ast.sourcepos;
        let range = self.index.range(
            self.source,
            (sourcepos.start.line, sourcepos.start.column),
            (sourcepos.end.line, sourcepos.end.column),
        );

        let kind = match &ast.value {
            NodeValue::Text(literal) => {
                // Empty literals carry nothing; a zero-length range would
                // otherwise read as a line break.
                if !literal.is_empty() {
                    let range = self.locate_text(literal, range);
                    self.document.add_text(parent, range, literal);
                }
                return;
            }
            NodeValue::SoftBreak => {
                let at = range.start;
                self.document.add_element(parent, ElementKind::Text, at..at);
                return;
            }
            NodeValue::Code(code) => {
                let inner = self.code_span_range(&code.literal, &range);
                let span = self.document.add_element(parent, ElementKind::CodeSpan, range);
                self.document.add_text(Some(span), inner, &code.literal);
                return;
            }
            NodeValue::Item(_) | NodeValue::TaskItem(_) => {
                let task = match &ast.value {
                    NodeValue::TaskItem(checked) => {
                        Some(checked.map(|c| c == 'x' || c == 'X').unwrap_or(false))
                    }
                    _ => None,
                };
                let item = self
                    .document
                    .add_element(parent, ElementKind::ListItem { task }, range);
                self.convert_item_children(node, item, depth + 1);
                return;
            }
            NodeValue::List(list) => match list.list_type {
                ComrakListType::Bullet => ElementKind::BulletedList,
                ComrakListType::Ordered => ElementKind::NumberedList {
                    start: u32::try_from(list.start).unwrap_or(u32::MAX),
                },
            },
            NodeValue::Paragraph => ElementKind::Paragraph,
            NodeValue::Heading(heading) => ElementKind::Header {
                level: HeadingLevel::from(heading.level),
            },
            NodeValue::CodeBlock(code) => ElementKind::CodeBlock {
                info: code.info.clone(),
                literal: code.literal.clone(),
            },
            NodeValue::Image(link) => ElementKind::Image {
                url: link.url.clone(),
                title: link.title.clone(),
            },
            NodeValue::Link(link) => ElementKind::Link {
                url: link.url.clone(),
                title: link.title.clone(),
            },
            NodeValue::LineBreak => ElementKind::LineBreak,
            NodeValue::Emph => ElementKind::Emphasis,
            NodeValue::Strong => ElementKind::Strong,
            NodeValue::Strikethrough => ElementKind::Strikethrough,
            NodeValue::Superscript => ElementKind::Superscript,
            NodeValue::BlockQuote => ElementKind::BlockQuote,
            NodeValue::ThematicBreak => ElementKind::ThematicBreak,
            NodeValue::HtmlBlock(_) => ElementKind::HtmlBlock,
            NodeValue::HtmlInline(_) => ElementKind::HtmlInline,
            NodeValue::Table(_) => ElementKind::Table,
            NodeValue::TableRow(header) => ElementKind::TableRow { header: *header },
            NodeValue::TableCell => ElementKind::TableCell,
            NodeValue::FootnoteReference(reference) => {
                ElementKind::FootnoteReference(reference.name.clone())
            }
            NodeValue::FootnoteDefinition(definition) => {
                ElementKind::FootnoteDefinition(definition.name.clone())
            }
            NodeValue::FrontMatter(_) => return,
            _ => ElementKind::Other,
        };
        drop(ast);

        let id = self.document.add_element(parent, kind, range);
        self.convert_children(node, id, depth + 1);
    }

    /// Convert a list item's children, folding a leading paragraph into the
    /// item so its text follows the list marker on the same line.
    fn convert_item_children<'a>(&mut self, node: &'a AstNode<'a>, item: ElementId, depth: usize) {
        for (position, child) in node.children().enumerate() {
            let is_paragraph = matches!(child.data.borrow().value, NodeValue::Paragraph);
            if position == 0 && is_paragraph {
                self.convert_children(child, item, depth);
            } else {
                self.convert_node(child, Some(item), depth);
            }
        }
    }

    /// Range of a text literal in the source.
    ///
    /// The sourcepos range wins when it spells the literal. Otherwise the
    /// literal is searched forward from the previous text; when it cannot be
    /// found (escapes, entities) the raw sourcepos range is kept and the
    /// document stores the decoded literal.
    fn locate_text(&mut self, literal: &str, range: Range<usize>) -> Range<usize> {
        if self.source.get(range.clone()) == Some(literal) {
            self.text_cursor = range.end;
            return range;
        }

        let found = self
            .source
            .get(self.text_cursor..)
            .and_then(|rest| rest.find(literal));
        match found {
            Some(offset) => {
                let start = self.text_cursor + offset;
                let end = start + literal.len();
                self.text_cursor = end;
                start..end
            }
            None => range,
        }
    }

    /// Range of the code inside an inline code span, without its fence.
    fn code_span_range(&self, literal: &str, span: &Range<usize>) -> Range<usize> {
        let slice = slice_range(self.source, span);
        if !literal.is_empty() {
            if let Some(offset) = slice.find(literal) {
                let start = span.start + offset;
                return start..start + literal.len();
            }
        }

        let fence = slice.len() - slice.trim_start_matches('`').len();
        let start = span.start + fence;
        let end = span.end.saturating_sub(fence).max(start);
        start..end
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::Element;

    fn root_kinds(doc: &Document) -> Vec<ElementKind> {
        doc.roots()
            .iter()
            .map(|id| doc.element(*id).kind.clone())
            .collect()
    }

    fn child_kinds(doc: &Document, element: &Element) -> Vec<ElementKind> {
        element
            .children
            .iter()
            .map(|id| doc.element(*id).kind.clone())
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Basic Parsing Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_empty_document() {
        let doc = parse_markdown("").unwrap();
        assert!(doc.roots().is_empty());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parse_whitespace_only_document() {
        let doc = parse_markdown("   \n\n  \n").unwrap();
        assert!(doc.roots().is_empty());
    }

    #[test]
    fn test_parse_simple_paragraph() {
        let doc = parse_markdown("Hello, world!").unwrap();
        assert_eq!(root_kinds(&doc), vec![ElementKind::Paragraph]);

        let para = doc.element(doc.roots()[0]);
        assert_eq!(child_kinds(&doc, para), vec![ElementKind::Text]);
        let text = doc.element(para.children[0]);
        assert_eq!(doc.text_at(&text.range), "Hello, world!");
    }

    #[test]
    fn test_parse_heading_level() {
        let doc = parse_markdown("## Heading 2").unwrap();
        assert_eq!(
            root_kinds(&doc),
            vec![ElementKind::Header {
                level: HeadingLevel::H2
            }]
        );
        assert_eq!(doc.text_content(doc.roots()[0]), "Heading 2");
    }

    #[test]
    fn test_text_ranges_point_into_source() {
        let source = "see ![alt](url) here";
        let doc = parse_markdown(source).unwrap();
        let para = doc.element(doc.roots()[0]);

        let kinds = child_kinds(&doc, para);
        assert_eq!(kinds.len(), 3);
        assert_eq!(kinds[0], ElementKind::Text);
        assert!(matches!(kinds[1], ElementKind::Image { ref url, .. } if url == "url"));
        assert_eq!(kinds[2], ElementKind::Text);

        let before = doc.element(para.children[0]);
        let after = doc.element(para.children[2]);
        assert_eq!(doc.text_at(&before.range), "see ");
        assert_eq!(doc.text_at(&after.range), " here");
    }

    #[test]
    fn test_escapes_and_entities_are_decoded() {
        let doc = parse_markdown(r"a \* b").unwrap();
        assert_eq!(doc.text_content(doc.roots()[0]), "a * b");

        let doc = parse_markdown("a &amp; b &copy; c").unwrap();
        assert_eq!(doc.text_content(doc.roots()[0]), "a & b \u{a9} c");
    }

    #[test]
    fn test_soft_break_becomes_empty_text() {
        let doc = parse_markdown("one\ntwo").unwrap();
        let para = doc.element(doc.roots()[0]);
        assert_eq!(para.children.len(), 3);

        let soft = doc.element(para.children[1]);
        assert_eq!(soft.kind, ElementKind::Text);
        assert!(soft.range.is_empty());
    }

    #[test]
    fn test_inline_code_has_text_child() {
        let doc = parse_markdown("Use `code` inline").unwrap();
        let para = doc.element(doc.roots()[0]);
        let span = para
            .children
            .iter()
            .map(|id| doc.element(*id))
            .find(|e| e.kind == ElementKind::CodeSpan)
            .expect("code span");

        assert_eq!(span.children.len(), 1);
        let text = doc.element(span.children[0]);
        assert_eq!(doc.text_at(&text.range), "code");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // List Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_bulleted_list_folds_first_paragraph() {
        let doc = parse_markdown("- Item 1\n- Item 2").unwrap();
        assert_eq!(root_kinds(&doc), vec![ElementKind::BulletedList]);

        let list = doc.element(doc.roots()[0]);
        assert_eq!(list.children.len(), 2);

        let item = doc.element(list.children[0]);
        assert_eq!(item.kind, ElementKind::ListItem { task: None });
        assert_eq!(child_kinds(&doc, item), vec![ElementKind::Text]);
        assert_eq!(doc.text_content(list.children[1]), "Item 2");
    }

    #[test]
    fn test_parse_numbered_list_positions() {
        let doc = parse_markdown("3. First\n4. Second\n5. Third").unwrap();
        assert_eq!(
            root_kinds(&doc),
            vec![ElementKind::NumberedList { start: 3 }]
        );

        let list = doc.element(doc.roots()[0]);
        let positions: Vec<usize> = list
            .children
            .iter()
            .map(|id| doc.element(*id).numbered_list_position)
            .collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_loose_list_keeps_later_paragraphs() {
        let doc = parse_markdown("- first\n\n  second\n\n- next").unwrap();
        let list = doc.element(doc.roots()[0]);
        let item = doc.element(list.children[0]);
        assert_eq!(
            child_kinds(&doc, item),
            vec![ElementKind::Text, ElementKind::Paragraph]
        );
    }

    #[test]
    fn test_parse_task_list() {
        let doc = parse_markdown("- [ ] Unchecked\n- [x] Checked").unwrap();
        let list = doc.element(doc.roots()[0]);
        let tasks: Vec<ElementKind> = child_kinds(&doc, list);
        assert_eq!(
            tasks,
            vec![
                ElementKind::ListItem { task: Some(false) },
                ElementKind::ListItem { task: Some(true) },
            ]
        );
    }

    #[test]
    fn test_nested_list_parent_lookup() {
        let doc = parse_markdown("1. outer\n   - inner").unwrap();
        let outer = doc.element(doc.roots()[0]);
        let outer_item = doc.element(outer.children[0]);
        let inner_list_id = outer_item
            .children
            .iter()
            .copied()
            .find(|id| doc.element(*id).kind == ElementKind::BulletedList)
            .expect("nested list");
        let inner_item_id = doc.element(inner_list_id).children[0];

        assert_eq!(
            doc.parent(inner_item_id).map(|p| p.kind.clone()),
            Some(ElementKind::BulletedList)
        );
        assert_eq!(doc.element(inner_item_id).numbered_list_position, 0);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Block Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_fenced_code_block() {
        let doc = parse_markdown("before\n```rust\nfn main() {}\n```\nafter").unwrap();
        let kinds = root_kinds(&doc);
        assert_eq!(kinds.len(), 3);
        assert_eq!(kinds[0], ElementKind::Paragraph);
        assert_eq!(
            kinds[1],
            ElementKind::CodeBlock {
                info: "rust".to_string(),
                literal: "fn main() {}\n".to_string(),
            }
        );
        assert_eq!(kinds[2], ElementKind::Paragraph);
    }

    #[test]
    fn test_parse_blockquote_and_rule() {
        let doc = parse_markdown("> quoted\n\n---\n\nafter").unwrap();
        assert_eq!(
            root_kinds(&doc),
            vec![
                ElementKind::BlockQuote,
                ElementKind::ThematicBreak,
                ElementKind::Paragraph
            ]
        );
    }

    #[test]
    fn test_parse_strikethrough_enabled_by_default() {
        let doc = parse_markdown("~~gone~~").unwrap();
        let para = doc.element(doc.roots()[0]);
        assert_eq!(child_kinds(&doc, para), vec![ElementKind::Strikethrough]);
    }

    #[test]
    fn test_parse_table() {
        let markdown = "| A | B |\n|---|---|\n| 1 | 2 |";
        let doc = parse_markdown(markdown).unwrap();
        assert_eq!(root_kinds(&doc), vec![ElementKind::Table]);

        let table = doc.element(doc.roots()[0]);
        assert_eq!(
            doc.element(table.children[0]).kind,
            ElementKind::TableRow { header: true }
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Robustness Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_malformed_markdown() {
        let inputs = [
            "# Unclosed heading",
            "```\nunclosed code block",
            "| broken | table",
            "[unclosed link(",
            "![broken image",
            "***nested emphasis**",
            "Hei på deg, 世界 🎉",
        ];

        for input in inputs {
            let result = parse_markdown(input);
            assert!(result.is_ok(), "Failed to parse: {}", input);
        }
    }

    #[test]
    fn test_depth_limit_drops_deep_content() {
        let markdown = ">>>>>>>>>> deep";
        let doc = ComrakParser::default().max_depth(3).parse(markdown).unwrap();

        let mut depth = 0;
        let mut current = doc.roots().first().copied();
        while let Some(id) = current {
            depth += 1;
            current = doc.element(id).children.first().copied();
        }
        assert!(depth <= 3);
    }

    #[test]
    fn test_line_index_offsets() {
        let index = LineIndex::new("ab\ncd\n");
        assert_eq!(index.offset(1, 1), Some(0));
        assert_eq!(index.offset(2, 2), Some(4));
        assert_eq!(index.offset(0, 1), None);
        assert_eq!(index.offset(9, 1), None);
    }
}
