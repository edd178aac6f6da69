//! The end-to-end generation pipeline: Fetch → Render → Map → Embed.
//!
//! Linear and fail-fast — every stage either completes or aborts the
//! whole run; there are no retries and never partial output. Each call
//! owns its composer, fonts, and buffers exclusively, so concurrent
//! calls for different invoices need no coordination.

use tracing::{debug, instrument};

use crate::core::{InvoiceLineItem, InvoiceRecord, PipelineError, SupplierConfig};
use crate::hybrid::{self, ConformanceLevel};
use crate::render::{self, PdfOptions};
use crate::ubl;

/// Supplies `(record, items)` pairs from wherever invoices live.
///
/// Fetching is the only I/O-bound stage of the pipeline; implementors
/// that query asynchronously should resolve their future before
/// entering the CPU-bound generation call.
pub trait InvoiceSource {
    /// Load an invoice and its ordered line items, or `None` when the
    /// id is unknown.
    fn load(
        &self,
        invoice_id: &str,
    ) -> Result<Option<(InvoiceRecord, Vec<InvoiceLineItem>)>, PipelineError>;
}

/// The finished hybrid artifact: a visual PDF with the UBL payload
/// attached, plus the transport metadata derived from it.
#[derive(Debug, Clone)]
pub struct HybridInvoice {
    invoice_number: String,
    bytes: Vec<u8>,
}

impl HybridInvoice {
    /// The final binary. First bytes are the PDF signature.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the artifact, yielding the binary.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Suggested download filename, derived from the invoice number.
    pub fn filename(&self) -> String {
        format!("invoice-{}.pdf", self.invoice_number)
    }

    /// Content type for the transport boundary.
    pub fn content_type(&self) -> &'static str {
        "application/pdf"
    }
}

/// One configured generation pipeline.
///
/// Construction wires in the process-wide supplier identity; geometry
/// and conformance level have sensible defaults and can be overridden
/// builder-style.
#[derive(Debug, Clone)]
pub struct Generator {
    supplier: SupplierConfig,
    options: PdfOptions,
    level: ConformanceLevel,
}

impl Generator {
    pub fn new(supplier: SupplierConfig) -> Self {
        Self {
            supplier,
            options: PdfOptions::default(),
            level: ConformanceLevel::default(),
        }
    }

    /// Override the page geometry and typography.
    pub fn with_options(mut self, options: PdfOptions) -> Self {
        self.options = options;
        self
    }

    /// Override the declared conformance level.
    pub fn with_conformance(mut self, level: ConformanceLevel) -> Self {
        self.level = level;
        self
    }

    /// Run Render → Map → Embed for one invoice snapshot.
    #[instrument(skip_all, fields(invoice = %record.invoice_number))]
    pub fn generate(
        &self,
        record: &InvoiceRecord,
        items: &[InvoiceLineItem],
    ) -> Result<HybridInvoice, PipelineError> {
        let pdf = render::render_pdf(record, items, &self.supplier, &self.options)?;
        debug!(stage = "render", "visual document complete");

        let mapped = ubl::map_invoice(record, items, &self.supplier);
        let xml = ubl::to_ubl_xml(&mapped)?;
        debug!(stage = "map", lines = mapped.lines.len(), "structured payload complete");

        let bytes = hybrid::embed_invoice_xml(&pdf, &xml, self.level)?;
        debug!(stage = "embed", bytes = bytes.len(), "hybrid artifact complete");

        Ok(HybridInvoice {
            invoice_number: record.invoice_number.clone(),
            bytes,
        })
    }

    /// Fetch an invoice from `source` and generate its hybrid artifact.
    /// An unknown id aborts with [`PipelineError::NotFound`] before any
    /// rendering work.
    pub fn generate_from<S: InvoiceSource>(
        &self,
        source: &S,
        invoice_id: &str,
    ) -> Result<HybridInvoice, PipelineError> {
        let (record, items) = source.load(invoice_id)?.ok_or(PipelineError::NotFound)?;
        self.generate(&record, &items)
    }
}
