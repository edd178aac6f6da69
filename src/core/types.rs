use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A persisted invoice, as handed over by the storage collaborator.
///
/// Monetary invariants (`total_amount == subtotal + tax_amount`,
/// `tax_amount == round(subtotal * tax_rate / 100)`) are assumed, not
/// checked — the pipeline mirrors the values it is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Invoice number, unique within the issuing tenant.
    pub invoice_number: String,
    /// Customer legal name.
    pub customer_name: String,
    /// Customer billing email.
    pub customer_email: Option<String>,
    /// Free-text postal address, newline-delimited
    /// (line 1 street, line 2 city, line 3 postal code).
    pub customer_address: Option<String>,
    /// Date the invoice was issued.
    pub issue_date: NaiveDate,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Lifecycle status.
    pub status: InvoiceStatus,
    /// Net total before tax.
    pub subtotal: Decimal,
    /// VAT rate as a percentage (e.g. 19).
    pub tax_rate: Decimal,
    /// Tax amount on `subtotal` at `tax_rate`.
    pub tax_amount: Decimal,
    /// Gross total, `subtotal + tax_amount`.
    pub total_amount: Decimal,
    /// Free-text remarks printed below the totals block.
    pub notes: Option<String>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

/// One invoice position. Order of the sequence is rendering order.
///
/// `line_total` is expected to equal `quantity * unit_price`; like the
/// record-level totals it is trusted as given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    /// Line identifier, unique within the invoice.
    pub id: String,
    /// Human-readable position text.
    pub description: String,
    /// Invoiced quantity.
    pub quantity: Decimal,
    /// Net price per unit.
    pub unit_price: Decimal,
    /// Net line amount.
    pub line_total: Decimal,
}

/// Process-wide supplier identity and jurisdiction, injected at pipeline
/// construction rather than compiled into the rendering code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierConfig {
    /// Supplier legal name (also the document header).
    pub name: String,
    /// Street and house number.
    pub street: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 jurisdiction, applied to both parties.
    pub country_code: String,
    /// VAT identifier (e.g. "DE812526315").
    pub vat_id: String,
    /// Billing contact email.
    pub email: String,
    /// Single contact line centered in the page footer.
    pub contact_line: String,
    /// ISO 4217 invoice currency.
    pub currency_code: String,
}

impl Default for SupplierConfig {
    fn default() -> Self {
        Self {
            name: "Nordlicht Software GmbH".into(),
            street: "Kaiserstraße 14".into(),
            city: "Hamburg".into(),
            postal_code: "20095".into(),
            country_code: "DE".into(),
            vat_id: "DE812526315".into(),
            email: "billing@nordlicht-software.de".into(),
            contact_line:
                "Nordlicht Software GmbH · Kaiserstraße 14 · 20095 Hamburg · billing@nordlicht-software.de"
                    .into(),
            currency_code: "EUR".into(),
        }
    }
}
