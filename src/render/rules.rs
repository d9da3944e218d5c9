//! Element classification and list prefix formatting.

use crate::markdown::{Document, Element, ElementId, ElementKind};

pub const BULLET: &str = "\u{2022}";
pub const NEWLINE: &str = "\n";

const TASK_UNCHECKED: &str = "\u{2610} ";
const TASK_CHECKED: &str = "\u{2611} ";

/// Whether the element starts on a fresh line.
pub fn needs_leading_newline(kind: &ElementKind) -> bool {
    match kind {
        ElementKind::Paragraph | ElementKind::ListItem { .. } | ElementKind::Header { .. } => true,
        ElementKind::Text
        | ElementKind::LineBreak
        | ElementKind::BulletedList
        | ElementKind::NumberedList { .. }
        | ElementKind::CodeBlock { .. }
        | ElementKind::Image { .. }
        | ElementKind::CodeSpan
        | ElementKind::Emphasis
        | ElementKind::Strong
        | ElementKind::Strikethrough
        | ElementKind::Superscript
        | ElementKind::Link { .. }
        | ElementKind::BlockQuote
        | ElementKind::ThematicBreak
        | ElementKind::HtmlBlock
        | ElementKind::HtmlInline
        | ElementKind::Table
        | ElementKind::TableRow { .. }
        | ElementKind::TableCell
        | ElementKind::FootnoteReference(_)
        | ElementKind::FootnoteDefinition(_)
        | ElementKind::Other => false,
    }
}

/// Whether the element opens a list nesting level.
pub fn is_list(kind: &ElementKind) -> bool {
    match kind {
        ElementKind::BulletedList | ElementKind::NumberedList { .. } => true,
        ElementKind::Text
        | ElementKind::LineBreak
        | ElementKind::Paragraph
        | ElementKind::Header { .. }
        | ElementKind::ListItem { .. }
        | ElementKind::CodeBlock { .. }
        | ElementKind::Image { .. }
        | ElementKind::CodeSpan
        | ElementKind::Emphasis
        | ElementKind::Strong
        | ElementKind::Strikethrough
        | ElementKind::Superscript
        | ElementKind::Link { .. }
        | ElementKind::BlockQuote
        | ElementKind::ThematicBreak
        | ElementKind::HtmlBlock
        | ElementKind::HtmlInline
        | ElementKind::Table
        | ElementKind::TableRow { .. }
        | ElementKind::TableCell
        | ElementKind::FootnoteReference(_)
        | ElementKind::FootnoteDefinition(_)
        | ElementKind::Other => false,
    }
}

/// Marker written before a list item's content.
///
/// Bulleted-list membership is decided by the parent's kind. Numbered items
/// show their list's start offset by their 1-based position. Items outside a
/// bulleted list with no numbered position get no marker.
pub fn list_item_prefix(document: &Document, id: ElementId) -> String {
    let Some(element) = document.get(id) else {
        return String::new();
    };
    let position = element.numbered_list_position;

    match document.parent(id).map(|parent| &parent.kind) {
        Some(ElementKind::BulletedList) => format!("{} ", BULLET),
        _ if position == 0 => String::new(),
        Some(ElementKind::NumberedList { start }) => {
            format!("{}. ", *start as usize + position - 1)
        }
        _ => format!("{}. ", position),
    }
}

/// Checkbox glyph for a task list item.
pub fn task_marker(checked: bool) -> &'static str {
    if checked {
        TASK_CHECKED
    } else {
        TASK_UNCHECKED
    }
}

/// Text of a text leaf; empty leaves read as a line break.
pub fn leaf_text<'d>(document: &'d Document, element: &'d Element) -> &'d str {
    let text = document.literal(element);
    if text.is_empty() {
        NEWLINE
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_newline_kinds() {
        assert!(needs_leading_newline(&ElementKind::Paragraph));
        assert!(needs_leading_newline(&ElementKind::ListItem { task: None }));
        assert!(needs_leading_newline(&ElementKind::Header {
            level: crate::markdown::HeadingLevel::H2
        }));
        assert!(!needs_leading_newline(&ElementKind::Text));
        assert!(!needs_leading_newline(&ElementKind::BulletedList));
        assert!(!needs_leading_newline(&ElementKind::BlockQuote));
    }

    #[test]
    fn test_is_list() {
        assert!(is_list(&ElementKind::BulletedList));
        assert!(is_list(&ElementKind::NumberedList { start: 1 }));
        assert!(!is_list(&ElementKind::ListItem { task: None }));
    }

    #[test]
    fn test_bulleted_prefix() {
        let mut doc = Document::new("- a");
        let list = doc.add_element(None, ElementKind::BulletedList, 0..3);
        let item = doc.add_element(Some(list), ElementKind::ListItem { task: None }, 0..3);
        assert_eq!(list_item_prefix(&doc, item), "\u{2022} ");
    }

    #[test]
    fn test_numbered_prefix() {
        let mut doc = Document::new("7. a");
        let list = doc.add_element(None, ElementKind::NumberedList { start: 7 }, 0..4);
        let item = doc.add_element(Some(list), ElementKind::ListItem { task: None }, 0..4);
        assert_eq!(list_item_prefix(&doc, item), "7. ");
    }

    #[test]
    fn test_numbered_prefix_from_zero() {
        let mut doc = Document::new("0. a\n1. b");
        let list = doc.add_element(None, ElementKind::NumberedList { start: 0 }, 0..9);
        let first = doc.add_element(Some(list), ElementKind::ListItem { task: None }, 0..4);
        let second = doc.add_element(Some(list), ElementKind::ListItem { task: None }, 5..9);
        assert_eq!(list_item_prefix(&doc, first), "0. ");
        assert_eq!(list_item_prefix(&doc, second), "1. ");
    }

    #[test]
    fn test_orphan_item_has_no_prefix() {
        let mut doc = Document::new("a");
        let item = doc.add_element(None, ElementKind::ListItem { task: None }, 0..1);
        assert_eq!(list_item_prefix(&doc, item), "");
    }

    #[test]
    fn test_task_marker() {
        assert_eq!(task_marker(true), "\u{2611} ");
        assert_eq!(task_marker(false), "\u{2610} ");
    }

    #[test]
    fn test_leaf_text_empty_range_is_newline() {
        let mut doc = Document::new("ab");
        let text = doc.add_element(None, ElementKind::Text, 1..1);
        let full = doc.add_element(None, ElementKind::Text, 0..2);
        assert_eq!(leaf_text(&doc, doc.element(text)), "\n");
        assert_eq!(leaf_text(&doc, doc.element(full)), "ab");
    }
}
