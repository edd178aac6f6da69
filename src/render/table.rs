use rust_decimal::Decimal;

use super::composer::{Color, FontWeight, PageComposer};
use super::PdfOptions;
use crate::core::format::format_currency;
use crate::core::InvoiceLineItem;

/// Column split of the usable width: description 40%, quantity 15%,
/// unit price 20%, line total 25%. Numeric columns are right-aligned
/// against their column edge.
const DESCRIPTION_SHARE: f32 = 0.40;
const QUANTITY_SHARE: f32 = 0.15;
const UNIT_PRICE_SHARE: f32 = 0.20;

/// Render the line-item table at the current cursor: a bold header row,
/// then one row per item. An empty item sequence renders the header
/// only — no blank row is inserted, totals follow directly.
pub fn render_items_table(
    composer: &mut PageComposer,
    items: &[InvoiceLineItem],
    options: &PdfOptions,
) {
    let usable = options.usable_width();
    let description_x = options.margin;
    let quantity_edge = options.margin + usable * (DESCRIPTION_SHARE + QUANTITY_SHARE);
    let unit_price_edge = quantity_edge + usable * UNIT_PRICE_SHARE;
    let total_edge = options.right_edge();

    let size = options.font_size;
    let y = composer.cursor();
    composer.place_text("Description", description_x, y, size, FontWeight::Bold, Color::BLACK);
    composer.place_text_right("Quantity", quantity_edge, y, size, FontWeight::Bold, Color::BLACK);
    composer.place_text_right("Unit Price", unit_price_edge, y, size, FontWeight::Bold, Color::BLACK);
    composer.place_text_right("Total", total_edge, y, size, FontWeight::Bold, Color::BLACK);
    composer.advance(1.0);

    for item in items {
        let y = composer.cursor();
        composer.place_text(&item.description, description_x, y, size, FontWeight::Regular, Color::BLACK);
        composer.place_text_right(
            &natural_decimal(item.quantity),
            quantity_edge,
            y,
            size,
            FontWeight::Regular,
            Color::BLACK,
        );
        composer.place_text_right(
            &format_currency(item.unit_price),
            unit_price_edge,
            y,
            size,
            FontWeight::Regular,
            Color::BLACK,
        );
        composer.place_text_right(
            &format_currency(item.line_total),
            total_edge,
            y,
            size,
            FontWeight::Regular,
            Color::BLACK,
        );
        composer.advance(1.0);
    }
}

/// Quantity cells keep the natural decimal representation — no currency
/// formatting, no padded zeroes.
fn natural_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(description: &str, quantity: Decimal, unit_price: Decimal) -> InvoiceLineItem {
        InvoiceLineItem {
            id: "1".into(),
            description: description.into(),
            quantity,
            unit_price,
            line_total: quantity * unit_price,
        }
    }

    #[test]
    fn natural_quantities() {
        assert_eq!(natural_decimal(dec!(10)), "10");
        assert_eq!(natural_decimal(dec!(2.50)), "2.5");
        assert_eq!(natural_decimal(dec!(0.25)), "0.25");
    }

    #[test]
    fn header_plus_one_advance_per_row() {
        let options = PdfOptions::default();
        let mut composer = PageComposer::new(&options);
        let top = composer.cursor();
        let items = vec![
            item("Consulting", dec!(10), dec!(100)),
            item("Travel", dec!(1), dec!(250)),
        ];
        render_items_table(&mut composer, &items, &options);
        // header row + 2 item rows
        assert!((top - composer.cursor() - 3.0 * options.line_height).abs() < 0.001);
    }

    #[test]
    fn empty_items_render_header_only() {
        let options = PdfOptions::default();
        let mut composer = PageComposer::new(&options);
        let top = composer.cursor();
        render_items_table(&mut composer, &[], &options);
        assert!((top - composer.cursor() - options.line_height).abs() < 0.001);
    }
}
