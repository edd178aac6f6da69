use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{ADDRESS_PLACEHOLDER, UNIT_CODE_EACH};
use crate::core::{InvoiceLineItem, InvoiceRecord, SupplierConfig};

/// UNTDID 5305 tax band of a line or subtotal.
///
/// The record model carries a single invoice-wide rate, so the
/// aggregation in [`tax_subtotals`] only ever emits these two bands;
/// a multi-rate record shape would extend the aggregation, not its
/// consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum TaxBand {
    /// "S" — standard rated at the given percentage.
    Standard { rate: Decimal },
    /// "Z" — zero rated.
    ZeroRated,
}

impl TaxBand {
    /// UNTDID 5305 code letter.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Standard { .. } => "S",
            Self::ZeroRated => "Z",
        }
    }

    /// Applicable percentage.
    pub fn rate(&self) -> Decimal {
        match self {
            Self::Standard { rate } => *rate,
            Self::ZeroRated => Decimal::ZERO,
        }
    }
}

/// BG-23: one tax subtotal entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxSubtotal {
    pub band: TaxBand,
    /// BT-116: taxable base for this band.
    pub taxable_amount: Decimal,
    /// BT-117: tax on that base.
    pub tax_amount: Decimal,
}

/// BG-4 / BG-7: a party block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredParty {
    pub name: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country_code: String,
    pub vat_id: Option<String>,
    pub email: Option<String>,
}

/// BG-25: one invoice line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredLine {
    /// BT-126: line identifier.
    pub id: String,
    /// BT-153: item name.
    pub description: String,
    /// BT-129: invoiced quantity.
    pub quantity: Decimal,
    /// BT-130: unit of measure.
    pub unit_code: &'static str,
    /// BT-146: net unit price.
    pub unit_price: Decimal,
    /// BT-131: line extension amount.
    pub line_extension: Decimal,
    /// BT-151/152: classification of the line.
    pub band: TaxBand,
}

/// BG-22: legal monetary totals, mirrored from the record verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonetaryTotals {
    pub line_extension: Decimal,
    pub tax_exclusive: Decimal,
    pub tax_inclusive: Decimal,
    pub payable: Decimal,
}

/// The mapped invoice tree, ready for UBL serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredInvoice {
    pub number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub currency_code: String,
    pub note: Option<String>,
    pub supplier: StructuredParty,
    pub customer: StructuredParty,
    /// BT-110: total tax.
    pub tax_total: Decimal,
    pub tax_subtotals: Vec<TaxSubtotal>,
    pub totals: MonetaryTotals,
    pub lines: Vec<StructuredLine>,
}

/// Map a record and its items onto the semantic model.
///
/// Pure and total: no validation, no arithmetic corrections. A record
/// with inconsistent totals is mirrored as-is; fixing it is the
/// caller's job.
pub fn map_invoice(
    record: &InvoiceRecord,
    items: &[InvoiceLineItem],
    supplier: &SupplierConfig,
) -> StructuredInvoice {
    StructuredInvoice {
        number: record.invoice_number.clone(),
        issue_date: record.issue_date,
        due_date: record.due_date,
        currency_code: supplier.currency_code.clone(),
        note: record.notes.clone(),
        supplier: supplier_party(supplier),
        customer: customer_party(record, supplier),
        tax_total: record.tax_amount,
        tax_subtotals: tax_subtotals(record),
        totals: MonetaryTotals {
            line_extension: record.subtotal,
            tax_exclusive: record.subtotal,
            tax_inclusive: record.total_amount,
            payable: record.total_amount,
        },
        lines: mapped_lines(record, items),
    }
}

/// Aggregate the record's tax data into subtotal entries.
///
/// Always exactly two: the standard band carrying the invoice rate and
/// amounts, and an unconditional zero-rated band with zero amounts.
fn tax_subtotals(record: &InvoiceRecord) -> Vec<TaxSubtotal> {
    vec![
        TaxSubtotal {
            band: TaxBand::Standard {
                rate: record.tax_rate,
            },
            taxable_amount: record.subtotal,
            tax_amount: record.tax_amount,
        },
        TaxSubtotal {
            band: TaxBand::ZeroRated,
            taxable_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
        },
    ]
}

/// Every input maps to at least one line: empty item sequences get a
/// single synthesized placeholder so the "at least one invoice line"
/// cardinality of the standard always holds.
fn mapped_lines(record: &InvoiceRecord, items: &[InvoiceLineItem]) -> Vec<StructuredLine> {
    if items.is_empty() {
        return vec![StructuredLine {
            id: "1".into(),
            description: "No items".into(),
            quantity: Decimal::ONE,
            unit_code: UNIT_CODE_EACH,
            unit_price: Decimal::ZERO,
            line_extension: Decimal::ZERO,
            band: TaxBand::Standard {
                rate: Decimal::ZERO,
            },
        }];
    }

    items
        .iter()
        .map(|item| StructuredLine {
            id: item.id.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            unit_code: UNIT_CODE_EACH,
            unit_price: item.unit_price,
            line_extension: item.line_total,
            band: TaxBand::Standard {
                rate: record.tax_rate,
            },
        })
        .collect()
}

fn supplier_party(supplier: &SupplierConfig) -> StructuredParty {
    StructuredParty {
        name: supplier.name.clone(),
        street: supplier.street.clone(),
        city: supplier.city.clone(),
        postal_code: supplier.postal_code.clone(),
        country_code: supplier.country_code.clone(),
        vat_id: Some(supplier.vat_id.clone()),
        email: Some(supplier.email.clone()),
    }
}

/// The customer address is free text; line 1 maps to street, line 2 to
/// city, line 3 to postal code, each defaulting to a placeholder.
fn customer_party(record: &InvoiceRecord, supplier: &SupplierConfig) -> StructuredParty {
    let (street, city, postal_code) = split_address(record.customer_address.as_deref());
    StructuredParty {
        name: record.customer_name.clone(),
        street,
        city,
        postal_code,
        country_code: supplier.country_code.clone(),
        vat_id: None,
        email: record.customer_email.clone(),
    }
}

fn split_address(raw: Option<&str>) -> (String, String, String) {
    let mut lines = raw
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty());
    let mut next = || lines.next().unwrap_or(ADDRESS_PLACEHOLDER).to_string();
    (next(), next(), next())
}
