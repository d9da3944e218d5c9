//! Text styling: attribute sets and the policies that derive them.

mod attributes;
mod policy;

pub use attributes::{AttributeSet, FontFamily, FontSpec, ParagraphStyle};
pub use policy::{StyleFn, StylePolicy, ThemeStyle};
