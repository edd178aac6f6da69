use quick_xml::Reader;
use quick_xml::events::Event;

use super::writer::{XmlWriter, format_decimal};
use super::{CUSTOMIZATION_ID, INVOICE_TYPE_CODE, PROFILE_ID, ubl_ns};
use super::map::{StructuredInvoice, StructuredLine, StructuredParty, TaxSubtotal};
use crate::core::PipelineError;
use crate::core::format::format_date_iso;

/// Serialize a mapped invoice as UBL 2.1 Invoice XML.
pub fn to_ubl_xml(invoice: &StructuredInvoice) -> Result<String, PipelineError> {
    let currency = invoice.currency_code.as_str();
    let mut w = XmlWriter::new()?;

    w.start_element_with_attrs(
        "ubl:Invoice",
        &[
            ("xmlns:ubl", ubl_ns::INVOICE),
            ("xmlns:cac", ubl_ns::CAC),
            ("xmlns:cbc", ubl_ns::CBC),
        ],
    )?;

    // BT-24 / BT-23: fixed structural identifiers
    w.text_element("cbc:CustomizationID", CUSTOMIZATION_ID)?;
    w.text_element("cbc:ProfileID", PROFILE_ID)?;
    // BT-1: Invoice number
    w.text_element("cbc:ID", &invoice.number)?;
    // BT-2: Issue date
    w.text_element("cbc:IssueDate", &format_date_iso(invoice.issue_date))?;
    // BT-9: Due date
    w.text_element("cbc:DueDate", &format_date_iso(invoice.due_date))?;
    // BT-3: Type code
    w.text_element("cbc:InvoiceTypeCode", &INVOICE_TYPE_CODE.to_string())?;
    // BT-22: Note
    if let Some(note) = &invoice.note {
        w.text_element("cbc:Note", note)?;
    }
    // BT-5: Currency
    w.text_element("cbc:DocumentCurrencyCode", currency)?;

    write_party(&mut w, &invoice.supplier, "cac:AccountingSupplierParty")?;
    write_party(&mut w, &invoice.customer, "cac:AccountingCustomerParty")?;

    // BG-23: Tax total and subtotals
    w.start_element("cac:TaxTotal")?;
    w.amount_element("cbc:TaxAmount", invoice.tax_total, currency)?;
    for subtotal in &invoice.tax_subtotals {
        write_tax_subtotal(&mut w, subtotal, currency)?;
    }
    w.end_element("cac:TaxTotal")?;

    // BG-22: Legal monetary total
    w.start_element("cac:LegalMonetaryTotal")?;
    w.amount_element("cbc:LineExtensionAmount", invoice.totals.line_extension, currency)?;
    w.amount_element("cbc:TaxExclusiveAmount", invoice.totals.tax_exclusive, currency)?;
    w.amount_element("cbc:TaxInclusiveAmount", invoice.totals.tax_inclusive, currency)?;
    w.amount_element("cbc:PayableAmount", invoice.totals.payable, currency)?;
    w.end_element("cac:LegalMonetaryTotal")?;

    // BG-25: Invoice lines
    for line in &invoice.lines {
        write_line(&mut w, line, currency)?;
    }

    w.end_element("ubl:Invoice")?;
    w.into_string()
}

fn write_party(
    w: &mut XmlWriter,
    party: &StructuredParty,
    wrapper: &str,
) -> Result<(), PipelineError> {
    w.start_element(wrapper)?;
    w.start_element("cac:Party")?;

    w.start_element("cac:PostalAddress")?;
    w.text_element("cbc:StreetName", &party.street)?;
    w.text_element("cbc:CityName", &party.city)?;
    w.text_element("cbc:PostalZone", &party.postal_code)?;
    w.start_element("cac:Country")?;
    w.text_element("cbc:IdentificationCode", &party.country_code)?;
    w.end_element("cac:Country")?;
    w.end_element("cac:PostalAddress")?;

    if let Some(vat_id) = &party.vat_id {
        w.start_element("cac:PartyTaxScheme")?;
        w.text_element("cbc:CompanyID", vat_id)?;
        w.start_element("cac:TaxScheme")?;
        w.text_element("cbc:ID", "VAT")?;
        w.end_element("cac:TaxScheme")?;
        w.end_element("cac:PartyTaxScheme")?;
    }

    w.start_element("cac:PartyLegalEntity")?;
    w.text_element("cbc:RegistrationName", &party.name)?;
    w.end_element("cac:PartyLegalEntity")?;

    if let Some(email) = &party.email {
        w.start_element("cac:Contact")?;
        w.text_element("cbc:ElectronicMail", email)?;
        w.end_element("cac:Contact")?;
    }

    w.end_element("cac:Party")?;
    w.end_element(wrapper)?;
    Ok(())
}

fn write_tax_subtotal(
    w: &mut XmlWriter,
    subtotal: &TaxSubtotal,
    currency: &str,
) -> Result<(), PipelineError> {
    w.start_element("cac:TaxSubtotal")?;
    w.amount_element("cbc:TaxableAmount", subtotal.taxable_amount, currency)?;
    w.amount_element("cbc:TaxAmount", subtotal.tax_amount, currency)?;
    w.start_element("cac:TaxCategory")?;
    w.text_element("cbc:ID", subtotal.band.code())?;
    w.text_element("cbc:Percent", &format_decimal(subtotal.band.rate()))?;
    w.start_element("cac:TaxScheme")?;
    w.text_element("cbc:ID", "VAT")?;
    w.end_element("cac:TaxScheme")?;
    w.end_element("cac:TaxCategory")?;
    w.end_element("cac:TaxSubtotal")?;
    Ok(())
}

fn write_line(w: &mut XmlWriter, line: &StructuredLine, currency: &str) -> Result<(), PipelineError> {
    w.start_element("cac:InvoiceLine")?;
    w.text_element("cbc:ID", &line.id)?;
    w.quantity_element("cbc:InvoicedQuantity", line.quantity, line.unit_code)?;
    w.amount_element("cbc:LineExtensionAmount", line.line_extension, currency)?;

    w.start_element("cac:Item")?;
    w.text_element("cbc:Name", &line.description)?;
    w.start_element("cac:ClassifiedTaxCategory")?;
    w.text_element("cbc:ID", line.band.code())?;
    w.text_element("cbc:Percent", &format_decimal(line.band.rate()))?;
    w.start_element("cac:TaxScheme")?;
    w.text_element("cbc:ID", "VAT")?;
    w.end_element("cac:TaxScheme")?;
    w.end_element("cac:ClassifiedTaxCategory")?;
    w.end_element("cac:Item")?;

    w.start_element("cac:Price")?;
    w.amount_element("cbc:PriceAmount", line.unit_price, currency)?;
    w.end_element("cac:Price")?;

    w.end_element("cac:InvoiceLine")?;
    Ok(())
}

/// Pull the invoice number (BT-1, the document-level `cbc:ID`) out of a
/// UBL Invoice XML string. Used to verify extracted attachments without
/// materializing the whole tree.
pub fn parse_invoice_number(xml: &str) -> Result<String, PipelineError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                path.push(name);
            }
            Ok(Event::Text(ref e)) => {
                let at_document_id = path.len() == 2
                    && path[1] == "cbc:ID"
                    && matches!(path[0].as_str(), "ubl:Invoice" | "Invoice");
                if at_document_id {
                    let text = e
                        .unescape()
                        .map_err(|err| PipelineError::Mapping(format!("XML parse error: {err}")))?;
                    return Ok(text.into_owned());
                }
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(PipelineError::Mapping(format!("XML parse error: {e}")));
            }
            _ => {}
        }
    }

    Err(PipelineError::Mapping(
        "no document-level cbc:ID found".into(),
    ))
}
