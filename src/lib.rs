//! comment-blocks
//!
//! Turns a markdown comment body into an ordered list of render blocks for a
//! virtualized list: styled text, code blocks and images, in document order.
//!
//! ```ignore
//! use comment_blocks::{CommentRenderer, RenderBlock};
//!
//! let blocks = CommentRenderer::default().render("see ![cat](cat.png) here", 375.0);
//! assert!(matches!(blocks[1], RenderBlock::Image(_)));
//! ```

pub mod config;
pub mod error;
pub mod markdown;
pub mod render;
pub mod renderer;
pub mod string_utils;
pub mod style;
pub mod theme;

pub use error::{Error, Result};
pub use render::{transform, transform_with_options, RenderBlock, RenderOptions};
pub use renderer::CommentRenderer;
