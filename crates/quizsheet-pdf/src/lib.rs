//! PDF drawing surface for `quizsheet-render`.
//!
//! One [`PdfSurface`] produces one document: a fixed page size, base-14
//! Helvetica faces (no embedding), one Flate-compressed content stream
//! per page, and a single atomic write of the assembled file on finalize.

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

pub mod metrics;

use std::fs;
use std::path::{Path, PathBuf};

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};
use quizsheet_render::{Color, FontRole, Surface, SurfaceError};

/// Stroke width for boxes and ovals.
const BOX_STROKE_WIDTH: f32 = 0.5;

/// Bézier circle constant for ellipse segments.
const KAPPA: f32 = 0.552_284_75;

/// Resource names for the two built-in faces.
const FONT_REGULAR: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");

fn font_name(font: FontRole) -> Name<'static> {
    match font {
        FontRole::Regular => FONT_REGULAR,
        FontRole::Bold => FONT_BOLD,
    }
}

/// Paginated PDF backend over `pdf-writer`.
pub struct PdfSurface {
    output: PathBuf,
    page_width: f32,
    page_height: f32,
    closed_pages: Vec<Vec<u8>>,
    content: Content,
    finalized: bool,
}

impl PdfSurface {
    /// Open a surface that will save to `output` on finalize.
    pub fn new(output: impl Into<PathBuf>, page_width: f32, page_height: f32) -> Self {
        Self {
            output: output.into(),
            page_width,
            page_height,
            closed_pages: Vec::new(),
            content: Self::fresh_page_content(),
            finalized: false,
        }
    }

    /// Where the document will be written.
    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Pages closed so far, not counting the one in progress.
    pub fn closed_page_count(&self) -> usize {
        self.closed_pages.len()
    }

    fn fresh_page_content() -> Content {
        let mut content = Content::new();
        content.set_line_width(BOX_STROKE_WIDTH);
        content
    }

    fn close_current_page(&mut self) {
        let content = core::mem::replace(&mut self.content, Self::fresh_page_content());
        self.closed_pages.push(content.finish());
    }

    fn assemble(&mut self) -> Vec<u8> {
        let mut next_id = 1;
        let mut alloc = || {
            let id = Ref::new(next_id);
            next_id += 1;
            id
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let regular_id = alloc();
        let bold_id = alloc();
        let page_count = self.closed_pages.len();
        let page_ids: Vec<Ref> = (0..page_count).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..page_count).map(|_| alloc()).collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(page_count as i32);
        pdf.type1_font(regular_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_id).base_font(Name(b"Helvetica-Bold"));

        for (index, raw) in self.closed_pages.drain(..).enumerate() {
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
            pdf.stream(content_ids[index], &compressed)
                .filter(Filter::FlateDecode);

            let mut page = pdf.page(page_ids[index]);
            page.media_box(Rect::new(0.0, 0.0, self.page_width, self.page_height))
                .parent(pages_id)
                .contents(content_ids[index]);
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(FONT_REGULAR, regular_id);
            fonts.pair(FONT_BOLD, bold_id);
        }

        pdf.finish()
    }
}

impl Surface for PdfSurface {
    fn measure_text(&self, text: &str, font: FontRole, size: f32) -> f32 {
        metrics::text_width(text, font, size)
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, font: FontRole, size: f32) {
        let bytes = metrics::encode_winansi(text);
        self.content
            .begin_text()
            .set_font(font_name(font), size)
            .next_line(x, y)
            .show(Str(&bytes))
            .end_text();
    }

    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.content.rect(x, y, width, height);
        self.content.stroke();
    }

    fn draw_ellipse(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        let cx = (x0 + x1) / 2.0;
        let cy = (y0 + y1) / 2.0;
        let rx = (x1 - x0) / 2.0;
        let ry = (y1 - y0) / 2.0;
        let kx = rx * KAPPA;
        let ky = ry * KAPPA;

        self.content.move_to(cx + rx, cy);
        self.content
            .cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);
        self.content
            .cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);
        self.content
            .cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);
        self.content
            .cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);
        self.content.close_path();
        self.content.stroke();
    }

    fn set_fill_color(&mut self, color: Color) {
        self.content.set_fill_rgb(color.r, color.g, color.b);
    }

    fn new_page(&mut self) {
        self.close_current_page();
    }

    fn finalize(&mut self) -> Result<(), SurfaceError> {
        if self.finalized {
            return Err(SurfaceError::new(
                "already_finalized",
                "document was already saved",
            ));
        }
        self.close_current_page();
        let page_count = self.closed_pages.len();
        let bytes = self.assemble();
        fs::write(&self.output, bytes).map_err(|source| {
            SurfaceError::new(
                "save_failed",
                format!("cannot write {}", self.output.display()),
            )
            .with_source(source)
        })?;
        self.finalized = true;
        log::info!("wrote {page_count} page(s) to {}", self.output.display());
        Ok(())
    }
}
