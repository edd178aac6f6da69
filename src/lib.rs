//! # efaktura
//!
//! Hybrid e-invoice generation: renders an invoice record into a
//! single-page PDF, maps it onto the EN 16931 semantic model as UBL 2.1
//! XML, and embeds the XML Factur-X style (`factur-x.xml`) into the PDF
//! as a PDF/A-3 attachment.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! The pipeline trusts the arithmetic on the incoming record
//! (`total_amount == subtotal + tax_amount`); consistency is the caller's
//! contract, not re-derived here.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{NaiveDate, Utc};
//! use efaktura::core::*;
//! use efaktura::pipeline::Generator;
//! use rust_decimal_macros::dec;
//!
//! let record = InvoiceRecord {
//!     invoice_number: "INV-0001".into(),
//!     customer_name: "Acme GmbH".into(),
//!     customer_email: Some("billing@acme.example".into()),
//!     customer_address: Some("Marienplatz 1\nMünchen\n80331".into()),
//!     issue_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
//!     due_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
//!     status: InvoiceStatus::Sent,
//!     subtotal: dec!(1250.00),
//!     tax_rate: dec!(19),
//!     tax_amount: dec!(237.50),
//!     total_amount: dec!(1487.50),
//!     notes: None,
//!     created_at: Utc::now(),
//!     updated_at: Utc::now(),
//! };
//! let items = vec![InvoiceLineItem {
//!     id: "1".into(),
//!     description: "Consulting".into(),
//!     quantity: dec!(10),
//!     unit_price: dec!(125.00),
//!     line_total: dec!(1250.00),
//! }];
//!
//! let file = Generator::new(SupplierConfig::default())
//!     .generate(&record, &items)
//!     .unwrap();
//!
//! assert!(file.bytes().starts_with(b"%PDF"));
//! assert_eq!(file.filename(), "invoice-INV-0001.pdf");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `render` | Visual PDF composition (cursor-based, single page) |
//! | `ubl` | EN 16931 mapping and UBL 2.1 XML serialization |
//! | `hybrid` (default) | Factur-X PDF/A-3 embed/extract + the full pipeline |

pub mod core;

#[cfg(feature = "render")]
pub mod render;

#[cfg(feature = "ubl")]
pub mod ubl;

#[cfg(feature = "hybrid")]
pub mod hybrid;

#[cfg(feature = "hybrid")]
pub mod pipeline;

// Re-export core types at crate root for convenience
pub use crate::core::*;
