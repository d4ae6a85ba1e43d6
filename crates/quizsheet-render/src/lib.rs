//! Text-layout engine and page composer for `quizsheet`.
//!
//! Layout is backend-agnostic: everything here draws through the
//! [`Surface`] capability trait, so production output (PDF) and test
//! doubles share the same code paths.

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

mod layout;
mod surface;
mod wrap;

pub use quizsheet::{Record, StyleRun};

pub use layout::{LayoutConfig, LayoutEngine, SheetSummary};
pub use surface::{Color, FontRole, Surface, SurfaceError};
pub use wrap::{wrap_runs, DisplayLine, Word};
