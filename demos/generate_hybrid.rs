use chrono::{NaiveDate, Utc};
use efaktura::core::*;
use efaktura::hybrid::extract_invoice_xml;
use efaktura::pipeline::Generator;
use rust_decimal_macros::dec;

fn main() {
    let record = InvoiceRecord {
        invoice_number: "INV-0001".into(),
        customer_name: "Acme GmbH".into(),
        customer_email: Some("billing@acme.example".into()),
        customer_address: Some("Marienplatz 1\nMünchen\n80331".into()),
        issue_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
        status: InvoiceStatus::Sent,
        subtotal: dec!(1250.00),
        tax_rate: dec!(19),
        tax_amount: dec!(237.50),
        total_amount: dec!(1487.50),
        notes: Some("Payable within 30 days.".into()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let items = vec![
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
    ];

    let generator = Generator::new(SupplierConfig::default());
    let file = generator
        .generate(&record, &items)
        .expect("hybrid generation failed");

    std::fs::write(file.filename(), file.bytes()).expect("write failed");
    println!("wrote {} ({} bytes)", file.filename(), file.bytes().len());

    let xml = extract_invoice_xml(file.bytes()).expect("extraction failed");
    println!("embedded payload: {} bytes of UBL XML", xml.len());
}
