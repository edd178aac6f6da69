//! Factur-X style hybrid assembly: attach the UBL payload to the visual
//! PDF and mark the container as a PDF/A-3 e-invoice.
//!
//! Embedding is additive only — page content is never touched. On any
//! failure the original input stays untouched and no bytes are
//! returned.

mod embed;
mod extract;
mod profile;
mod xmp;

pub use embed::embed_invoice_xml;
pub use extract::extract_invoice_xml;
pub use profile::ConformanceLevel;

/// The embedded XML attachment name, per Factur-X convention.
pub const FACTURX_FILENAME: &str = "factur-x.xml";
