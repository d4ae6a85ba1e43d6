//! Word wrapping over styled runs.
//!
//! Runs flatten into words that each keep their style; words never split
//! across lines. The first line of a block may carry a reduced budget to
//! reserve room for a leading label; later lines always wrap against the
//! full column width.

use quizsheet::StyleRun;
use serde::{Deserialize, Serialize};

use crate::surface::{FontRole, Surface};

/// Atomic wrapping unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Word text with one synthetic trailing space, except block-final.
    pub text: String,
    /// Drawn in the bold face when set.
    pub emphasized: bool,
}

impl Word {
    /// Font used to measure and draw this word.
    pub fn font(&self) -> FontRole {
        if self.emphasized {
            FontRole::Bold
        } else {
            FontRole::Regular
        }
    }
}

/// One laid-out line of words.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayLine {
    /// Words in draw order.
    pub words: Vec<Word>,
    /// Sum of measured word widths, in points.
    pub width: f32,
}

fn flatten_words(runs: &[StyleRun]) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();
    for run in runs {
        for fragment in run.text.split(' ') {
            if fragment.is_empty() {
                continue;
            }
            let mut text = String::with_capacity(fragment.len() + 1);
            text.push_str(fragment);
            text.push(' ');
            words.push(Word {
                text,
                emphasized: run.emphasized,
            });
        }
    }
    // The trailing space is a rendering convenience between words; the
    // block-final word does not need one.
    if let Some(last) = words.last_mut() {
        last.text.pop();
    }
    words
}

/// Wrap styled runs into display lines.
///
/// `label_width` narrows the budget of line 0 only. Every emitted line
/// holds at least one word: a single word wider than the budget is placed
/// anyway and allowed to overflow rather than producing an empty line.
pub fn wrap_runs<S: Surface + ?Sized>(
    surface: &S,
    runs: &[StyleRun],
    max_width: f32,
    size: f32,
    label_width: f32,
) -> Vec<DisplayLine> {
    let mut lines: Vec<DisplayLine> = Vec::new();
    let mut line = DisplayLine::default();

    for word in flatten_words(runs) {
        let word_width = surface.measure_text(&word.text, word.font(), size);
        let budget = if lines.is_empty() {
            max_width - label_width
        } else {
            max_width
        };
        if line.width + word_width > budget && !line.words.is_empty() {
            lines.push(core::mem::take(&mut line));
        }
        line.width += word_width;
        line.words.push(word);
    }
    if !line.words.is_empty() {
        lines.push(line);
    }
    lines
}
