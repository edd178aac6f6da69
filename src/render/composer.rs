use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

use super::PdfOptions;
use super::metrics::text_width;

/// RGB fill/stroke color, components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    /// Muted gray for labels and secondary text.
    pub const MUTED: Color = Color::new(0.45, 0.45, 0.45);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Stroke color for horizontal rules.
const RULE_COLOR: Color = Color::new(0.78, 0.78, 0.78);

/// The two faces registered as page resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

impl FontWeight {
    /// Resource name in the page's `/Font` dictionary.
    pub(crate) fn resource_name(&self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }
}

/// Cursor-based accumulator for one page of drawing instructions.
///
/// Holds a single monotonically decreasing y cursor and an append-only
/// arena of content-stream operations. `place_text` never moves the
/// cursor; only [`PageComposer::advance`] does, and it never clamps —
/// content placed below the bottom margin overflows silently.
///
/// One composer serves exactly one document and is not shared across
/// threads.
pub struct PageComposer {
    options: PdfOptions,
    cursor: f32,
    ops: Vec<Operation>,
}

impl PageComposer {
    /// Start a fresh page with the cursor at the top margin.
    pub fn new(options: &PdfOptions) -> Self {
        Self {
            options: *options,
            cursor: options.page_height - options.margin,
            ops: Vec::new(),
        }
    }

    /// Current vertical cursor position (PDF user space, origin bottom-left).
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Move the cursor down by `lines` line heights.
    pub fn advance(&mut self, lines: f32) {
        self.cursor -= lines * self.options.line_height;
    }

    /// Append a text run with its baseline at `(x, y)`.
    pub fn place_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Color,
    ) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![weight.resource_name().into(), Object::Real(size)],
        ));
        self.ops.push(Operation::new(
            "rg",
            vec![
                Object::Real(color.r),
                Object::Real(color.g),
                Object::Real(color.b),
            ],
        ));
        self.ops
            .push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(text),
                StringFormat::Literal,
            )],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    /// Append a text run ending at `right_edge`.
    pub fn place_text_right(
        &mut self,
        text: &str,
        right_edge: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Color,
    ) {
        let x = right_edge - text_width(text, size, weight);
        self.place_text(text, x, y, size, weight, color);
    }

    /// Append a text run centered on `center_x`.
    pub fn place_text_centered(
        &mut self,
        text: &str,
        center_x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Color,
    ) {
        let x = center_x - text_width(text, size, weight) / 2.0;
        self.place_text(text, x, y, size, weight, color);
    }

    /// Append a horizontal separator rule at height `y`.
    pub fn draw_rule(&mut self, x_start: f32, x_end: f32, y: f32) {
        self.ops.push(Operation::new("q", vec![]));
        self.ops
            .push(Operation::new("w", vec![Object::Real(0.5)]));
        self.ops.push(Operation::new(
            "RG",
            vec![
                Object::Real(RULE_COLOR.r),
                Object::Real(RULE_COLOR.g),
                Object::Real(RULE_COLOR.b),
            ],
        ));
        self.ops.push(Operation::new(
            "m",
            vec![Object::Real(x_start), Object::Real(y)],
        ));
        self.ops.push(Operation::new(
            "l",
            vec![Object::Real(x_end), Object::Real(y)],
        ));
        self.ops.push(Operation::new("S", vec![]));
        self.ops.push(Operation::new("Q", vec![]));
    }

    /// Consume the composer, yielding the accumulated operations.
    pub(crate) fn into_operations(self) -> Vec<Operation> {
        self.ops
    }

    #[cfg(test)]
    pub(crate) fn operation_count(&self) -> usize {
        self.ops.len()
    }
}

/// Encode text for the WinAnsi (CP1252) base encoding of the built-in
/// fonts. CP1252 agrees with Latin-1 outside 0x80..0x9F; the euro sign
/// is the one code point from that window invoices need. Anything else
/// unmappable degrades to '?'.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '€' => 0x80,
            c if (c as u32) < 0x100 && !(0x80..0xA0).contains(&(c as u32)) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}
