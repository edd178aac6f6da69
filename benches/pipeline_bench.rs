use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use efaktura::core::*;
use efaktura::hybrid::{self, ConformanceLevel};
use efaktura::pipeline::Generator;
use efaktura::render::{PdfOptions, render_pdf};
use efaktura::ubl;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn bench_record() -> InvoiceRecord {
    InvoiceRecord {
        invoice_number: "BENCH-0001".into(),
        customer_name: "Kunde AG".into(),
        customer_email: Some("rechnung@kunde.de".into()),
        customer_address: Some("Leopoldstraße 42\nMünchen\n80802".into()),
        issue_date: test_date(),
        due_date: test_date(),
        status: InvoiceStatus::Sent,
        subtotal: dec!(6000.00),
        tax_rate: dec!(19),
        tax_amount: dec!(1140.00),
        total_amount: dec!(7140.00),
        notes: None,
        created_at: Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap(),
    }
}

fn bench_items(count: usize) -> Vec<InvoiceLineItem> {
    (1..=count)
        .map(|i| InvoiceLineItem {
            id: i.to_string(),
            description: format!("Service item {i}"),
            quantity: dec!(5),
            unit_price: dec!(120),
            line_total: dec!(600),
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let record = bench_record();
    let items = bench_items(10);
    let supplier = SupplierConfig::default();
    let options = PdfOptions::default();
    c.bench_function("render_pdf_10_items", |b| {
        b.iter(|| black_box(render_pdf(black_box(&record), black_box(&items), &supplier, &options)));
    });
}

fn bench_map_and_serialize(c: &mut Criterion) {
    let record = bench_record();
    let items = bench_items(10);
    let supplier = SupplierConfig::default();
    c.bench_function("map_invoice", |b| {
        b.iter(|| black_box(ubl::map_invoice(black_box(&record), black_box(&items), &supplier)));
    });

    let mapped = ubl::map_invoice(&record, &items, &supplier);
    c.bench_function("ubl_serialize", |b| {
        b.iter(|| black_box(ubl::to_ubl_xml(black_box(&mapped))));
    });
}

fn bench_embed_extract(c: &mut Criterion) {
    let record = bench_record();
    let items = bench_items(10);
    let supplier = SupplierConfig::default();
    let pdf = render_pdf(&record, &items, &supplier, &PdfOptions::default()).unwrap();
    let xml = ubl::to_ubl_xml(&ubl::map_invoice(&record, &items, &supplier)).unwrap();

    c.bench_function("hybrid_embed", |b| {
        b.iter(|| {
            black_box(hybrid::embed_invoice_xml(
                black_box(&pdf),
                black_box(&xml),
                ConformanceLevel::Extended,
            ))
        });
    });

    let embedded = hybrid::embed_invoice_xml(&pdf, &xml, ConformanceLevel::Extended).unwrap();
    c.bench_function("hybrid_extract", |b| {
        b.iter(|| black_box(hybrid::extract_invoice_xml(black_box(&embedded))));
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let record = bench_record();
    let items = bench_items(10);
    let generator = Generator::new(SupplierConfig::default());
    c.bench_function("generate_hybrid_10_items", |b| {
        b.iter(|| black_box(generator.generate(black_box(&record), black_box(&items))));
    });
}

fn bench_full_pipeline_100_items(c: &mut Criterion) {
    let record = bench_record();
    let items = bench_items(100);
    let generator = Generator::new(SupplierConfig::default());
    c.bench_function("generate_hybrid_100_items", |b| {
        b.iter(|| black_box(generator.generate(black_box(&record), black_box(&items))));
    });
}

criterion_group!(
    benches,
    bench_render,
    bench_map_and_serialize,
    bench_embed_extract,
    bench_full_pipeline,
    bench_full_pipeline_100_items,
);
criterion_main!(benches);
