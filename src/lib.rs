//! Question-bank model and markup parsing for printable MCQ sheets.
//!
//! The root crate owns the line-oriented bank format (blank-line separated
//! records, `- ` choice lines) and the inline bold-span tokenizer. Layout
//! and rendering live in `quizsheet-render`; the PDF backend and CLI live
//! in `quizsheet-pdf`.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

pub mod bank;
pub mod markup;

pub use bank::{load_records, parse_records, BankError, Record};
pub use markup::{split_style_runs, StyleRun};
