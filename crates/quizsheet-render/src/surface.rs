//! Drawing-surface capability trait.
//!
//! The layout engine performs no I/O of its own; measurement and drawing
//! both go through [`Surface`]. Coordinates are in points with the origin
//! at the bottom-left of the page (y grows upward), so the vertical cursor
//! decreases as content flows down.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Font selection for measurement and text drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontRole {
    /// Body face.
    #[default]
    Regular,
    /// Emphasis, labels, and index digits.
    Bold,
}

/// RGB fill color, each channel in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Solid black.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Build from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Error surfaced by a backend when the document cannot be finalized.
#[derive(Debug)]
pub struct SurfaceError {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: Box<str>,
    /// Underlying I/O error, when one exists.
    pub source: Option<std::io::Error>,
}

impl SurfaceError {
    /// Build an error with a stable code.
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into().into_boxed_str(),
            source: None,
        }
    }

    /// Attach the underlying I/O error.
    pub fn with_source(mut self, source: std::io::Error) -> Self {
        self.source = Some(source);
        self
    }
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for SurfaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Capability interface over a paginated drawing backend.
///
/// One instance corresponds to one output document. The engine opens the
/// first page implicitly, calls [`new_page`](Self::new_page) on each page
/// break, and ends with exactly one [`finalize`](Self::finalize).
pub trait Surface {
    /// Width of `text` rendered in `font` at `size`, in points.
    fn measure_text(&self, text: &str, font: FontRole, size: f32) -> f32;

    /// Draw `text` with its baseline-left corner at `(x, y)`.
    fn draw_text(&mut self, x: f32, y: f32, text: &str, font: FontRole, size: f32);

    /// Stroke a rectangle from its bottom-left corner.
    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Stroke an ellipse inscribed in the `(x0, y0)..(x1, y1)` box.
    fn draw_ellipse(&mut self, x0: f32, y0: f32, x1: f32, y1: f32);

    /// Set the fill color for subsequent text.
    fn set_fill_color(&mut self, color: Color);

    /// Close the current page and open a fresh one.
    fn new_page(&mut self);

    /// Close the document and persist it.
    fn finalize(&mut self) -> Result<(), SurfaceError>;
}
