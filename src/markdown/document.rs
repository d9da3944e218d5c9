//! Parsed markdown document model
//!
//! A [`Document`] owns the raw markdown source and an arena of [`Element`]s.
//! Elements refer to each other through [`ElementId`]s: a parent lists its
//! children, and a child keeps the id of its parent for lookups only. The
//! tree is built once by a parser and is read-only afterwards.

use std::ops::Range;

use crate::string_utils::slice_range;

// ─────────────────────────────────────────────────────────────────────────────
// Element Kinds
// ─────────────────────────────────────────────────────────────────────────────

/// Heading level (H1-H6)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1 = 1,
    H2 = 2,
    H3 = 3,
    H4 = 4,
    H5 = 5,
    H6 = 6,
}

impl From<u8> for HeadingLevel {
    fn from(level: u8) -> Self {
        match level {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            4 => HeadingLevel::H4,
            5 => HeadingLevel::H5,
            _ => HeadingLevel::H6,
        }
    }
}

/// The kind of a markdown element.
///
/// This is a closed set: adding a variant forces every exhaustive match in
/// the renderer to be revisited.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Plain text span. Its literal is the source text at the element range.
    Text,
    /// Hard line break
    LineBreak,
    /// Paragraph
    Paragraph,
    /// Heading (H1-H6)
    Header { level: HeadingLevel },
    /// List item. `task` is `Some(checked)` for task list items.
    ListItem { task: Option<bool> },
    /// Unordered list container
    BulletedList,
    /// Ordered list container starting at `start`
    NumberedList { start: u32 },
    /// Fenced or indented code block
    CodeBlock { info: String, literal: String },
    /// Image with its destination
    Image { url: String, title: String },
    /// Inline code; the code text is a single `Text` child
    CodeSpan,
    /// Emphasis (italic)
    Emphasis,
    /// Strong emphasis (bold)
    Strong,
    /// Strikethrough
    Strikethrough,
    /// Superscript
    Superscript,
    /// Link
    Link { url: String, title: String },
    /// Block quote (>)
    BlockQuote,
    /// Thematic break (horizontal rule)
    ThematicBreak,
    /// Raw HTML block
    HtmlBlock,
    /// Raw inline HTML
    HtmlInline,
    /// Table
    Table,
    /// Table row
    TableRow { header: bool },
    /// Table cell
    TableCell,
    /// Footnote reference
    FootnoteReference(String),
    /// Footnote definition
    FootnoteDefinition(String),
    /// Anything the parser does not model more precisely
    Other,
}

// ─────────────────────────────────────────────────────────────────────────────
// Elements
// ─────────────────────────────────────────────────────────────────────────────

/// Stable handle of an element inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// One parsed unit of the markdown document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// What this element is
    pub kind: ElementKind,
    /// Half-open byte span into the document source
    pub range: Range<usize>,
    /// Child elements in document order
    pub children: Vec<ElementId>,
    /// Enclosing element, `None` for roots
    pub parent: Option<ElementId>,
    /// 1-based position inside an enclosing numbered list, 0 otherwise
    pub numbered_list_position: usize,
    /// Decoded text of a `Text` element whose source spells it differently
    /// (backslash escapes, entity references)
    pub literal: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Document
// ─────────────────────────────────────────────────────────────────────────────

/// A parsed markdown document: raw source plus the element tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    source: String,
    elements: Vec<Element>,
    roots: Vec<ElementId>,
}

impl Document {
    /// Create an empty document over `source`.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            elements: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Append an element as the last child of `parent` (or as a new root).
    ///
    /// Items appended to a [`ElementKind::NumberedList`] get their 1-based
    /// index in the list as `numbered_list_position`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this document.
    pub fn add_element(
        &mut self,
        parent: Option<ElementId>,
        kind: ElementKind,
        range: Range<usize>,
    ) -> ElementId {
        let id = ElementId(self.elements.len());

        let numbered_list_position = match parent {
            Some(parent_id) => {
                let parent = &self.elements[parent_id.0];
                match (&parent.kind, &kind) {
                    (ElementKind::NumberedList { .. }, ElementKind::ListItem { .. }) => {
                        parent.children.len() + 1
                    }
                    _ => 0,
                }
            }
            None => 0,
        };

        self.elements.push(Element {
            kind,
            range,
            children: Vec::new(),
            parent,
            numbered_list_position,
            literal: None,
        });

        match parent {
            Some(parent_id) => self.elements[parent_id.0].children.push(id),
            None => self.roots.push(id),
        }

        id
    }

    /// Append a `Text` element for `literal` found at `range`.
    ///
    /// The literal is only stored when the source at `range` reads
    /// differently.
    pub fn add_text(
        &mut self,
        parent: Option<ElementId>,
        range: Range<usize>,
        literal: &str,
    ) -> ElementId {
        let differs = self.text_at(&range) != literal;
        let id = self.add_element(parent, ElementKind::Text, range);
        if differs {
            self.elements[id.0].literal = Some(literal.to_string());
        }
        id
    }

    /// Override the numbered-list position the builder computed.
    pub fn set_numbered_list_position(&mut self, id: ElementId, position: usize) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.numbered_list_position = position;
        }
    }

    /// The raw markdown source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Top-level elements in document order.
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// Number of elements in the arena.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when the document has no elements at all.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Look up an element.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this document.
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    /// Look up an element, returning `None` for foreign ids.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// The enclosing element of `id`, if any.
    pub fn parent(&self, id: ElementId) -> Option<&Element> {
        self.get(id)?.parent.and_then(|parent| self.get(parent))
    }

    /// Display text of a `Text` element: its decoded literal, or the source
    /// at its range.
    pub fn literal<'a>(&'a self, element: &'a Element) -> &'a str {
        match &element.literal {
            Some(literal) => literal,
            None => self.text_at(&element.range),
        }
    }

    /// The source text covered by `range`, snapped to character boundaries.
    pub fn text_at(&self, range: &Range<usize>) -> &str {
        slice_range(&self.source, range)
    }

    /// Concatenated literal text of all `Text` descendants of `id`.
    pub fn text_content(&self, id: ElementId) -> String {
        let mut text = String::new();
        self.collect_text(id, &mut text);
        text
    }

    fn collect_text(&self, id: ElementId, output: &mut String) {
        let Some(element) = self.get(id) else {
            return;
        };
        match element.kind {
            ElementKind::Text => output.push_str(self.literal(element)),
            ElementKind::LineBreak => output.push('\n'),
            _ => {}
        }
        for child in &element.children {
            self.collect_text(*child, output);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_element_links_parent_and_children() {
        let mut doc = Document::new("hello");
        let para = doc.add_element(None, ElementKind::Paragraph, 0..5);
        let text = doc.add_element(Some(para), ElementKind::Text, 0..5);

        assert_eq!(doc.roots(), &[para]);
        assert_eq!(doc.element(para).children, vec![text]);
        assert_eq!(doc.element(text).parent, Some(para));
        assert_eq!(doc.parent(text).map(|p| &p.kind), Some(&ElementKind::Paragraph));
        assert!(doc.parent(para).is_none());
    }

    #[test]
    fn test_numbered_list_positions_are_one_based() {
        let mut doc = Document::new("0. a\n1. b");
        let list = doc.add_element(None, ElementKind::NumberedList { start: 0 }, 0..9);
        let first = doc.add_element(Some(list), ElementKind::ListItem { task: None }, 0..4);
        let second = doc.add_element(Some(list), ElementKind::ListItem { task: None }, 5..9);

        assert_eq!(doc.element(first).numbered_list_position, 1);
        assert_eq!(doc.element(second).numbered_list_position, 2);
        assert_eq!(doc.element(list).numbered_list_position, 0);
    }

    #[test]
    fn test_bulleted_items_have_no_position() {
        let mut doc = Document::new("- a");
        let list = doc.add_element(None, ElementKind::BulletedList, 0..3);
        let item = doc.add_element(Some(list), ElementKind::ListItem { task: None }, 0..3);
        assert_eq!(doc.element(item).numbered_list_position, 0);
    }

    #[test]
    fn test_set_numbered_list_position_overrides() {
        let mut doc = Document::new("1. a");
        let list = doc.add_element(None, ElementKind::NumberedList { start: 1 }, 0..4);
        let item = doc.add_element(Some(list), ElementKind::ListItem { task: None }, 0..4);
        doc.set_numbered_list_position(item, 0);
        assert_eq!(doc.element(item).numbered_list_position, 0);
    }

    #[test]
    fn test_text_content_collects_descendants() {
        let source = "a **b** c";
        let mut doc = Document::new(source);
        let para = doc.add_element(None, ElementKind::Paragraph, 0..9);
        doc.add_element(Some(para), ElementKind::Text, 0..2);
        let strong = doc.add_element(Some(para), ElementKind::Strong, 2..7);
        doc.add_element(Some(strong), ElementKind::Text, 4..5);
        doc.add_element(Some(para), ElementKind::Text, 7..9);

        assert_eq!(doc.text_content(para), "a b c");
        assert_eq!(doc.text_content(strong), "b");
    }

    #[test]
    fn test_add_text_keeps_literal_only_when_source_differs() {
        let source = r"a \* b";
        let mut doc = Document::new(source);
        let plain = doc.add_text(None, 0..2, "a ");
        let escaped = doc.add_text(None, 0..source.len(), "a * b");

        assert_eq!(doc.element(plain).literal, None);
        assert_eq!(doc.literal(doc.element(plain)), "a ");
        assert_eq!(doc.element(escaped).literal.as_deref(), Some("a * b"));
        assert_eq!(doc.text_content(escaped), "a * b");
    }

    #[test]
    fn test_text_at_is_safe_for_bad_ranges() {
        let doc = Document::new("abc");
        assert_eq!(doc.text_at(&(1..100)), "bc");
        assert_eq!(doc.text_at(&(50..60)), "");
    }

    #[test]
    fn test_heading_level_from_u8() {
        assert_eq!(HeadingLevel::from(1), HeadingLevel::H1);
        assert_eq!(HeadingLevel::from(4), HeadingLevel::H4);
        assert_eq!(HeadingLevel::from(9), HeadingLevel::H6);
    }
}
