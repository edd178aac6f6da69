#![cfg(feature = "hybrid")]

use chrono::{NaiveDate, TimeZone, Utc};
use efaktura::core::*;
use efaktura::hybrid::{
    embed_invoice_xml, extract_invoice_xml, ConformanceLevel, FACTURX_FILENAME,
};
use efaktura::render::{render_pdf, PdfOptions};
use efaktura::ubl::{map_invoice, parse_invoice_number, to_ubl_xml};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_record() -> InvoiceRecord {
    InvoiceRecord {
        invoice_number: "INV-0001".into(),
        customer_name: "Acme GmbH".into(),
        customer_email: None,
        customer_address: Some("Marienplatz 1\nMünchen\n80331".into()),
        issue_date: date(2024, 6, 15),
        due_date: date(2024, 7, 15),
        status: InvoiceStatus::Sent,
        subtotal: dec!(1250.00),
        tax_rate: dec!(19),
        tax_amount: dec!(237.50),
        total_amount: dec!(1487.50),
        notes: None,
        created_at: Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap(),
    }
}

fn test_items() -> Vec<InvoiceLineItem> {
    vec![InvoiceLineItem {
        id: "1".into(),
        description: "Consulting".into(),
        quantity: dec!(10),
        unit_price: dec!(125.00),
        line_total: dec!(1250.00),
    }]
}

fn visual_pdf() -> Vec<u8> {
    render_pdf(
        &test_record(),
        &test_items(),
        &SupplierConfig::default(),
        &PdfOptions::default(),
    )
    .unwrap()
}

fn invoice_xml() -> String {
    to_ubl_xml(&map_invoice(
        &test_record(),
        &test_items(),
        &SupplierConfig::default(),
    ))
    .unwrap()
}

// ── Embedding ───────────────────────────────────────────────────────────────

#[test]
fn embedding_grows_a_valid_pdf() {
    let pdf = visual_pdf();
    let hybrid = embed_invoice_xml(&pdf, &invoice_xml(), ConformanceLevel::Extended).unwrap();
    assert!(hybrid.len() > pdf.len());
    assert!(hybrid.starts_with(b"%PDF"));
}

#[test]
fn embedding_registers_catalog_entries() {
    let hybrid =
        embed_invoice_xml(&visual_pdf(), &invoice_xml(), ConformanceLevel::Extended).unwrap();
    let doc = lopdf::Document::load_mem(&hybrid).unwrap();
    let catalog = doc.catalog().unwrap();
    assert!(catalog.get(b"AF").is_ok(), "AF array missing");
    assert!(catalog.get(b"Names").is_ok(), "Names dict missing");
    assert!(catalog.get(b"Metadata").is_ok(), "Metadata missing");
}

#[test]
fn embedding_keeps_page_content() {
    let hybrid =
        embed_invoice_xml(&visual_pdf(), &invoice_xml(), ConformanceLevel::Extended).unwrap();
    let doc = lopdf::Document::load_mem(&hybrid).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
    let text = String::from_utf8_lossy(&hybrid);
    assert!(text.contains("Consulting"));
    assert!(text.contains("1,487.50"));
}

#[test]
fn xmp_declares_hybrid_profile() {
    let hybrid =
        embed_invoice_xml(&visual_pdf(), &invoice_xml(), ConformanceLevel::Extended).unwrap();
    let text = String::from_utf8_lossy(&hybrid);
    assert!(text.contains("pdfaid:part"), "missing PDF/A identification");
    assert!(text.contains("EXTENDED"), "missing conformance level");
    assert!(text.contains(FACTURX_FILENAME), "missing attachment name");
}

#[test]
fn en16931_level_is_declared_when_selected() {
    let hybrid =
        embed_invoice_xml(&visual_pdf(), &invoice_xml(), ConformanceLevel::En16931).unwrap();
    assert!(String::from_utf8_lossy(&hybrid).contains("EN 16931"));
}

// ── Roundtrip ───────────────────────────────────────────────────────────────

#[test]
fn embed_extract_roundtrip_is_exact() {
    let xml = invoice_xml();
    let hybrid = embed_invoice_xml(&visual_pdf(), &xml, ConformanceLevel::Extended).unwrap();
    let extracted = extract_invoice_xml(&hybrid).unwrap();
    assert_eq!(extracted, xml);
}

#[test]
fn extracted_payload_preserves_invoice_number() {
    let hybrid =
        embed_invoice_xml(&visual_pdf(), &invoice_xml(), ConformanceLevel::Extended).unwrap();
    let extracted = extract_invoice_xml(&hybrid).unwrap();
    assert_eq!(parse_invoice_number(&extracted).unwrap(), "INV-0001");
}

// ── Failure paths ───────────────────────────────────────────────────────────

#[test]
fn extraction_from_plain_pdf_fails() {
    let result = extract_invoice_xml(&visual_pdf());
    assert!(matches!(result, Err(PipelineError::Embedding(_))));
}

#[test]
fn embedding_into_garbage_fails_without_output() {
    let result = embed_invoice_xml(b"not a pdf", &invoice_xml(), ConformanceLevel::Extended);
    assert!(matches!(result, Err(PipelineError::Embedding(_))));
}
