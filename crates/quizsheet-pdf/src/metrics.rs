//! Built-in metrics for the base-14 Helvetica faces.
//!
//! Advance widths come from the Adobe AFM files, in 1/1000 em units for
//! the printable ASCII range. Sheets are measured against these tables so
//! layout needs no font files at all, matching the viewer-side metrics of
//! the unembedded Type1 fonts.

use quizsheet_render::FontRole;

/// Fallback advance for characters outside the table (lowercase default).
const DEFAULT_REGULAR: u16 = 556;
const DEFAULT_BOLD: u16 = 611;

/// Helvetica advances for chars 0x20..=0x7E.
#[rustfmt::skip]
const REGULAR_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278,
    584, 584, 584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, 722, 278,
    500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advances for chars 0x20..=0x7E.
#[rustfmt::skip]
const BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333,
    584, 584, 584, 611, 975, 722, 722, 722, 722, 667, 611, 778, 722, 278,
    556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611, 556,
    333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556,
    333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Advance width of one char in 1/1000 em.
pub fn advance(ch: char, font: FontRole) -> u16 {
    let (table, default) = match font {
        FontRole::Regular => (&REGULAR_WIDTHS, DEFAULT_REGULAR),
        FontRole::Bold => (&BOLD_WIDTHS, DEFAULT_BOLD),
    };
    let code = ch as u32;
    if (0x20..=0x7E).contains(&code) {
        table[(code - 0x20) as usize]
    } else {
        default
    }
}

/// Width of `text` at `size` points.
pub fn text_width(text: &str, font: FontRole, size: f32) -> f32 {
    let units: u32 = text.chars().map(|ch| u32::from(advance(ch, font))).sum();
    units as f32 * size / 1000.0
}

/// Encode text for the WinAnsi-encoded base fonts.
///
/// ASCII and Latin-1 pass through; a handful of typographic characters map
/// to their WinAnsi slots; everything else degrades to `?`.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2026}' => 0x85,
            '\u{20AC}' => 0x80,
            _ => {
                let code = ch as u32;
                if code <= 0xFF {
                    code as u8
                } else {
                    b'?'
                }
            }
        })
        .collect()
}
