//! Render block model
//!
//! The output of a transform: an ordered list of blocks, each either a run
//! of styled text or an opaque code/image unit owned by the display layer.

use serde::{Deserialize, Serialize};

use crate::style::AttributeSet;

/// A contiguous span of text with its resolved formatting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledRun {
    pub text: String,
    pub attributes: AttributeSet,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, attributes: AttributeSet) -> Self {
        Self {
            text: text.into(),
            attributes,
        }
    }
}

/// Padding between a text block's container edges and its content.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Insets {
    /// The same inset on every edge.
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            left: value,
            bottom: value,
            right: value,
        }
    }
}

/// Finalized, trimmed styled text ready for measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub runs: Vec<StyledRun>,
    /// Width of the cell the block is laid out in
    pub container_width: f32,
    pub inset: Insets,
}

impl TextBlock {
    /// The plain text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.is_empty())
    }

    /// Width left for text once horizontal insets are taken out.
    pub fn content_width(&self) -> f32 {
        (self.container_width - self.inset.left - self.inset.right).max(0.0)
    }
}

/// A fenced or indented code block, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// An image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageBlock {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// One unit of output for the display layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderBlock {
    Text(TextBlock),
    Code(CodeBlock),
    Image(ImageBlock),
}

impl RenderBlock {
    pub fn is_text(&self) -> bool {
        matches!(self, RenderBlock::Text(_))
    }

    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            RenderBlock::Text(block) => Some(block),
            _ => None,
        }
    }
}
