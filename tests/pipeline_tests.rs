#![cfg(feature = "hybrid")]

use std::collections::HashMap;

use chrono::{NaiveDate, TimeZone, Utc};
use efaktura::core::*;
use efaktura::hybrid::extract_invoice_xml;
use efaktura::pipeline::{Generator, InvoiceSource};
use efaktura::ubl::parse_invoice_number;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Scenario: INV-0001, Acme GmbH, 19% on 1250.00.
fn test_record() -> InvoiceRecord {
    InvoiceRecord {
        invoice_number: "INV-0001".into(),
        customer_name: "Acme GmbH".into(),
        customer_email: Some("billing@acme.example".into()),
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
    vec![
        InvoiceLineItem {
            id: "1".into(),
            description: "Consulting".into(),
            quantity: dec!(10),
            unit_price: dec!(100.00),
            line_total: dec!(1000.00),
        },
        InvoiceLineItem {
            id: "2".into(),
            description: "Travel".into(),
            quantity: dec!(1),
            unit_price: dec!(250.00),
            line_total: dec!(250.00),
        },
    ]
}

fn generator() -> Generator {
    Generator::new(SupplierConfig::default())
}

/// In-memory stand-in for the persistence collaborator.
struct MemorySource {
    invoices: HashMap<String, (InvoiceRecord, Vec<InvoiceLineItem>)>,
}

impl MemorySource {
    fn with_test_invoice() -> Self {
        let mut invoices = HashMap::new();
        invoices.insert("INV-0001".to_string(), (test_record(), test_items()));
        Self { invoices }
    }
}

impl InvoiceSource for MemorySource {
    fn load(
        &self,
        invoice_id: &str,
    ) -> Result<Option<(InvoiceRecord, Vec<InvoiceLineItem>)>, PipelineError> {
        Ok(self.invoices.get(invoice_id).cloned())
    }
}

// ── End to end ──────────────────────────────────────────────────────────────

#[test]
fn full_pipeline_produces_hybrid_artifact() {
    let file = generator().generate(&test_record(), &test_items()).unwrap();

    assert!(file.bytes().starts_with(b"%PDF"));
    assert_eq!(file.filename(), "invoice-INV-0001.pdf");
    assert_eq!(file.content_type(), "application/pdf");

    let xml = extract_invoice_xml(file.bytes()).unwrap();
    assert_eq!(parse_invoice_number(&xml).unwrap(), "INV-0001");
    assert!(xml.contains(">1250.00</cbc:TaxableAmount>"));
    assert!(xml.contains(">237.50</cbc:TaxAmount>"));
}

#[test]
fn zero_item_invoice_still_produces_valid_output() {
    let file = generator().generate(&test_record(), &[]).unwrap();
    assert!(file.bytes().starts_with(b"%PDF"));

    let xml = extract_invoice_xml(file.bytes()).unwrap();
    assert_eq!(xml.matches("<cac:InvoiceLine>").count(), 1);
    assert!(xml.contains("No items"));
    assert_eq!(xml.matches("<cac:TaxSubtotal>").count(), 2);
}

#[test]
fn repeated_generation_is_stable() {
    let record = test_record();
    let items = test_items();
    let g = generator();
    let a = g.generate(&record, &items).unwrap();
    let b = g.generate(&record, &items).unwrap();
    assert_eq!(a.bytes(), b.bytes());
}

// ── Fetch stage ─────────────────────────────────────────────────────────────

#[test]
fn known_invoice_is_fetched_and_generated() {
    let source = MemorySource::with_test_invoice();
    let file = generator().generate_from(&source, "INV-0001").unwrap();
    assert_eq!(file.filename(), "invoice-INV-0001.pdf");
}

#[test]
fn unknown_invoice_aborts_with_not_found() {
    let source = MemorySource::with_test_invoice();
    let result = generator().generate_from(&source, "INV-9999");
    match result {
        Err(err) => assert!(err.is_not_found()),
        Ok(_) => panic!("expected NotFound"),
    }
}
