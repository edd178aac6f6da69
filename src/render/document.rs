use lopdf::content::Content;
use lopdf::{Document, Object, Stream, dictionary};
use tracing::debug;

use super::composer::{Color, FontWeight, PageComposer};
use super::table::render_items_table;
use super::PdfOptions;
use crate::core::format::{format_currency, format_date};
use crate::core::{InvoiceLineItem, InvoiceRecord, PipelineError, SupplierConfig};

/// Horizontal offset of meta values relative to their labels.
const META_VALUE_OFFSET: f32 = 90.0;

/// Share of the usable width left of the totals block.
const TOTALS_INSET: f32 = 0.55;

/// Compose the complete single-page visual document for one invoice.
///
/// Section order is fixed: header band, invoice meta, customer block,
/// line-item table, totals, optional notes, footer. Every position is
/// derived from accumulated cursor state only, so the same record and
/// items always produce identical placement.
///
/// All resources (composer arena, font dictionaries, output buffer) are
/// owned by this call and dropped on return, success or failure.
pub fn render_pdf(
    record: &InvoiceRecord,
    items: &[InvoiceLineItem],
    supplier: &SupplierConfig,
    options: &PdfOptions,
) -> Result<Vec<u8>, PipelineError> {
    let mut composer = PageComposer::new(options);
    let margin = options.margin;
    let right = options.right_edge();
    let size = options.font_size;

    // Header band: supplier name left, invoice number right
    composer.place_text(
        &supplier.name,
        margin,
        composer.cursor(),
        options.header_font_size,
        FontWeight::Bold,
        Color::BLACK,
    );
    composer.place_text_right(
        &record.invoice_number,
        right,
        composer.cursor(),
        size + 2.0,
        FontWeight::Regular,
        Color::MUTED,
    );
    composer.advance(2.5);

    // Invoice meta
    composer.place_text("Issue Date", margin, composer.cursor(), size, FontWeight::Regular, Color::MUTED);
    composer.place_text(
        &format_date(record.issue_date),
        margin + META_VALUE_OFFSET,
        composer.cursor(),
        size,
        FontWeight::Regular,
        Color::BLACK,
    );
    composer.advance(1.0);
    composer.place_text("Due Date", margin, composer.cursor(), size, FontWeight::Regular, Color::MUTED);
    composer.place_text(
        &format_date(record.due_date),
        margin + META_VALUE_OFFSET,
        composer.cursor(),
        size,
        FontWeight::Regular,
        Color::BLACK,
    );
    composer.advance(2.0);

    // Customer block
    composer.place_text("Bill To", margin, composer.cursor(), size, FontWeight::Regular, Color::MUTED);
    composer.advance(1.0);
    composer.place_text(
        &record.customer_name,
        margin,
        composer.cursor(),
        size,
        FontWeight::Bold,
        Color::BLACK,
    );
    composer.advance(1.0);
    if let Some(email) = &record.customer_email {
        composer.place_text(email, margin, composer.cursor(), size, FontWeight::Regular, Color::BLACK);
        composer.advance(1.0);
    }
    if let Some(address) = &record.customer_address {
        for line in address.lines() {
            composer.place_text(line, margin, composer.cursor(), size, FontWeight::Regular, Color::BLACK);
            composer.advance(1.0);
        }
    }
    composer.advance(1.0);

    // Line items
    render_items_table(&mut composer, items, options);
    composer.advance(1.0);

    // Totals, right-aligned against the right margin
    let label_x = margin + options.usable_width() * TOTALS_INSET;
    composer.draw_rule(label_x, right, composer.cursor() + options.line_height - 4.0);
    composer.place_text("Subtotal", label_x, composer.cursor(), size, FontWeight::Regular, Color::MUTED);
    composer.place_text_right(
        &format_currency(record.subtotal),
        right,
        composer.cursor(),
        size,
        FontWeight::Regular,
        Color::BLACK,
    );
    composer.advance(1.0);
    let vat_label = format!("VAT ({}%)", record.tax_rate.normalize());
    composer.place_text(&vat_label, label_x, composer.cursor(), size, FontWeight::Regular, Color::MUTED);
    composer.place_text_right(
        &format_currency(record.tax_amount),
        right,
        composer.cursor(),
        size,
        FontWeight::Regular,
        Color::BLACK,
    );
    composer.advance(1.2);
    composer.place_text("Total", label_x, composer.cursor(), size + 2.0, FontWeight::Bold, Color::BLACK);
    composer.place_text_right(
        &format_currency(record.total_amount),
        right,
        composer.cursor(),
        size + 2.0,
        FontWeight::Bold,
        Color::BLACK,
    );
    composer.advance(2.0);

    // Notes
    if let Some(notes) = &record.notes {
        composer.place_text("Notes", margin, composer.cursor(), size, FontWeight::Regular, Color::MUTED);
        composer.advance(1.0);
        for line in notes.lines() {
            composer.place_text(line, margin, composer.cursor(), size, FontWeight::Regular, Color::BLACK);
            composer.advance(1.0);
        }
    }

    // Footer, anchored to the bottom margin independent of the cursor
    composer.draw_rule(margin, right, margin + options.line_height);
    composer.place_text_centered(
        &supplier.contact_line,
        options.page_width / 2.0,
        margin,
        size - 1.0,
        FontWeight::Regular,
        Color::MUTED,
    );

    let bytes = assemble_document(composer, options)?;
    debug!(invoice = %record.invoice_number, bytes = bytes.len(), "rendered visual document");
    Ok(bytes)
}

/// Wrap the accumulated operations into a one-page PDF with the two
/// built-in faces registered as page resources.
fn assemble_document(composer: PageComposer, options: &PdfOptions) -> Result<Vec<u8>, PipelineError> {
    let content = Content {
        operations: composer.into_operations(),
    };
    let stream_bytes = content
        .encode()
        .map_err(|e| PipelineError::Render(format!("failed to encode content stream: {e}")))?;

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => Object::Reference(regular_id),
            "F2" => Object::Reference(bold_id),
        },
    });

    let content_id = doc.add_object(Stream::new(dictionary! {}, stream_bytes));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => vec![
            0.into(),
            0.into(),
            Object::Real(options.page_width),
            Object::Real(options.page_height),
        ],
        "Contents" => Object::Reference(content_id),
        "Resources" => Object::Reference(resources_id),
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| PipelineError::Render(format!("failed to save PDF: {e}")))?;
    Ok(output)
}
