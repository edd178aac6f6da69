//! Visual invoice rendering.
//!
//! A cursor-based composer places text and rules onto a single fixed-size
//! page and accumulates lopdf content-stream operations; the document
//! assembler runs the section sequence (header → meta → customer → items
//! table → totals → notes → footer) and serializes one complete PDF.
//!
//! There is no pagination: the cursor only moves down and is never
//! clamped, so oversized content overflows the bottom margin silently.
//! Rendering state is a plain operation arena plus a cursor value, which
//! keeps the door open for a page-break strategy without touching call
//! sites.

mod composer;
mod document;
mod metrics;
mod table;

pub use composer::{Color, FontWeight, PageComposer};
pub use document::render_pdf;
pub use table::render_items_table;

/// Page geometry and typography. Constructor defaults describe A4
/// portrait with a 50 pt margin; callers override at pipeline
/// construction, never per request.
#[derive(Debug, Clone, Copy)]
pub struct PdfOptions {
    /// Page width in points.
    pub page_width: f32,
    /// Page height in points.
    pub page_height: f32,
    /// Uniform page margin in points.
    pub margin: f32,
    /// Body font size in points.
    pub font_size: f32,
    /// Header font size in points.
    pub header_font_size: f32,
    /// Vertical distance per cursor line in points.
    pub line_height: f32,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            page_width: 595.28,
            page_height: 841.89,
            margin: 50.0,
            font_size: 10.0,
            header_font_size: 18.0,
            line_height: 14.0,
        }
    }
}

impl PdfOptions {
    /// Width available between the margins.
    pub fn usable_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// X coordinate of the right margin.
    pub fn right_edge(&self) -> f32 {
        self.page_width - self.margin
    }
}
