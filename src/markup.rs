//! Inline bold-span tokenizer.
//!
//! The only markup the sheet format supports is `**bold**`. A matched pair
//! becomes an emphasized run holding the inner text; everything outside
//! matched pairs stays plain. Unterminated markers are literal text, so the
//! scanner never fails on malformed input.

use serde::{Deserialize, Serialize};

const DELIM: &str = "**";

/// One styled span of a prompt or choice string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRun {
    /// Span text with delimiters stripped.
    pub text: String,
    /// True for `**…**` spans.
    pub emphasized: bool,
}

impl StyleRun {
    /// Plain-text run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    /// Emphasized run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// Split `text` into alternating plain/bold runs.
///
/// Concatenating the returned run texts reconstructs `text` with each
/// matched `**` pair removed exactly once. Empty runs are never emitted,
/// so `""` and `"****"` both yield an empty sequence.
pub fn split_style_runs(text: &str) -> Vec<StyleRun> {
    let mut runs = Vec::new();
    let mut rest = text;

    // Two-cursor scan over byte offsets; the delimiter is ASCII so the
    // offsets returned by `find` are always char boundaries.
    while let Some(open) = rest.find(DELIM) {
        let after_open = &rest[open + DELIM.len()..];
        let Some(close) = after_open.find(DELIM) else {
            // Unterminated opener: the rest of the string is literal.
            break;
        };
        if open > 0 {
            runs.push(StyleRun::plain(&rest[..open]));
        }
        let inner = &after_open[..close];
        if !inner.is_empty() {
            runs.push(StyleRun::bold(inner));
        }
        rest = &after_open[close + DELIM.len()..];
    }

    if !rest.is_empty() {
        runs.push(StyleRun::plain(rest));
    }
    runs
}
