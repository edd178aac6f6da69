//! EN 16931 mapping and UBL 2.1 XML serialization.
//!
//! [`map_invoice`] is a pure transformation from the persisted record
//! shape onto the semantic model; [`to_ubl_xml`] serializes the result.
//! Structural identifiers (customization, profile, type code) are
//! constants of the mapping, never derived from the record.

mod map;
mod writer;
mod xml;

pub use map::{
    map_invoice, MonetaryTotals, StructuredInvoice, StructuredLine, StructuredParty, TaxBand,
    TaxSubtotal,
};
pub use xml::{parse_invoice_number, to_ubl_xml};

/// BT-24: Specification identifier — EN 16931 conformant, Factur-X
/// Extended profile.
pub const CUSTOMIZATION_ID: &str =
    "urn:cen.eu:en16931:2017#conformant#urn:factur-x.eu:1p0:extended";

/// BT-23: Business process profile identifier.
pub const PROFILE_ID: &str = "urn:fdc:peppol.eu:2017:poacc:billing:01:1.0";

/// BT-3: UNTDID 1001 type code for a commercial invoice.
pub const INVOICE_TYPE_CODE: u16 = 380;

/// BT-130: UN/CEFACT Rec 20 unit for invoiced quantities ("one").
pub const UNIT_CODE_EACH: &str = "C62";

/// Placeholder for address segments the free-text customer address
/// does not provide.
pub const ADDRESS_PLACEHOLDER: &str = "N/A";

/// UBL 2.1 namespace URIs.
pub mod ubl_ns {
    pub const INVOICE: &str = "urn:oasis:names:specification:ubl:schema:xsd:Invoice-2";
    pub const CAC: &str =
        "urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2";
    pub const CBC: &str = "urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2";
}
