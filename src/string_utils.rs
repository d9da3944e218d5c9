//! UTF-8 safe string utilities
//!
//! Element ranges come from the parser as byte offsets. They are usually
//! on character boundaries, but a range derived from line/column positions
//! can land inside a multi-byte character (`ø`, `中`, `🎉`). Slicing there
//! panics, so every range is snapped to character boundaries before use.

use std::ops::Range;

// ─────────────────────────────────────────────────────────────────────────────
// Character Boundary Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Returns the largest index that is less than or equal to `index`
/// and is on a UTF-8 character boundary.
///
/// If `index` is greater than the string length, returns the string length.
#[inline]
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }

    let bytes = s.as_bytes();
    let mut i = index;
    while i > 0 && !is_utf8_char_start(bytes[i]) {
        i -= 1;
    }
    i
}

/// Returns the smallest index that is greater than or equal to `index`
/// and is on a UTF-8 character boundary.
///
/// If `index` is greater than or equal to the string length, returns the string length.
#[inline]
pub fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }

    let bytes = s.as_bytes();
    let mut i = index;
    while i < bytes.len() && !is_utf8_char_start(bytes[i]) {
        i += 1;
    }
    i
}

/// A byte is a char start unless it is a continuation byte (10xxxxxx).
#[inline]
fn is_utf8_char_start(byte: u8) -> bool {
    (byte & 0b1100_0000) != 0b1000_0000
}

// ─────────────────────────────────────────────────────────────────────────────
// Range Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Clamp `range` to `s` and widen it to character boundaries.
///
/// The start moves down, the end moves up. An inverted range collapses to an
/// empty range at its (snapped) start.
pub fn snap_range(s: &str, range: Range<usize>) -> Range<usize> {
    let start = floor_char_boundary(s, range.start);
    let end = ceil_char_boundary(s, range.end).max(start);
    start..end
}

/// Slice `s` by a byte range without panicking.
///
/// Out-of-bounds or mid-character ranges are snapped first; an empty or
/// inverted range yields `""`.
#[inline]
pub fn slice_range<'s>(s: &'s str, range: &Range<usize>) -> &'s str {
    let range = snap_range(s, range.clone());
    &s[range]
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
