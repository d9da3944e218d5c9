//! Text block finalization
//!
//! Accumulated runs are trimmed at both ends before they become a
//! [`TextBlock`]. Trimming is run-aware: runs that are only whitespace at the
//! edges are dropped, and the outermost surviving runs are shortened in place
//! so their attributes are kept.

use super::block::{Insets, StyledRun, TextBlock};

/// Wraps trimmed styled runs into text blocks for one container width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBlockFactory {
    container_width: f32,
    inset: Insets,
}

impl TextBlockFactory {
    pub fn new(container_width: f32, inset: Insets) -> Self {
        Self {
            container_width,
            inset,
        }
    }

    /// Trim `runs` and wrap them. The result may be empty.
    pub fn finalize(&self, runs: Vec<StyledRun>) -> TextBlock {
        TextBlock {
            runs: trim_runs(runs),
            container_width: self.container_width,
            inset: self.inset,
        }
    }
}

/// Strip leading and trailing whitespace across a run sequence.
pub fn trim_runs(mut runs: Vec<StyledRun>) -> Vec<StyledRun> {
    runs.retain(|run| !run.text.is_empty());

    let first = runs.iter().position(|run| !run.text.trim().is_empty());
    let Some(first) = first else {
        return Vec::new();
    };
    // A non-blank run exists, so rposition finds one too.
    let last = runs
        .iter()
        .rposition(|run| !run.text.trim().is_empty())
        .unwrap_or(first);

    runs.truncate(last + 1);
    runs.drain(..first);

    if let Some(run) = runs.first_mut() {
        let trimmed = run.text.trim_start();
        if trimmed.len() != run.text.len() {
            run.text = trimmed.to_string();
        }
    }
    if let Some(run) = runs.last_mut() {
        let trimmed_len = run.text.trim_end().len();
        run.text.truncate(trimmed_len);
    }

    runs
}
