use lopdf::{Document, Object, Stream, dictionary};
use tracing::debug;

use super::FACTURX_FILENAME;
use super::profile::ConformanceLevel;
use super::xmp;
use crate::core::PipelineError;

/// Fixed language tag declared in the container metadata.
const XMP_LANGUAGE: &str = "en";

/// Attach an invoice XML payload to a rendered PDF and mark the result
/// as a PDF/A-3 hybrid invoice.
///
/// The page content of the input is left untouched; on failure the
/// error carries no partial output.
pub fn embed_invoice_xml(
    pdf_bytes: &[u8],
    xml: &str,
    level: ConformanceLevel,
) -> Result<Vec<u8>, PipelineError> {
    let mut doc = Document::load_mem(pdf_bytes)
        .map_err(|e| PipelineError::Embedding(format!("failed to load PDF: {e}")))?;

    attach_payload(&mut doc, xml.as_bytes(), level)?;

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| PipelineError::Embedding(format!("failed to save PDF: {e}")))?;

    debug!(bytes = output.len(), level = level.xmp_level(), "embedded invoice payload");
    Ok(output)
}

fn attach_payload(
    doc: &mut Document,
    xml_bytes: &[u8],
    level: ConformanceLevel,
) -> Result<(), PipelineError> {
    // EmbeddedFile stream carrying the payload
    let payload_stream = Stream::new(
        dictionary! {
            "Type" => "EmbeddedFile",
            "Subtype" => Object::Name(b"text#2Fxml".to_vec()),
            "Params" => dictionary! {
                "Size" => Object::Integer(xml_bytes.len() as i64),
            },
        },
        xml_bytes.to_vec(),
    );
    let payload_id = doc.add_object(payload_stream);

    // FileSpec naming the attachment and its relationship to the document
    let filespec = dictionary! {
        "Type" => "Filespec",
        "F" => Object::string_literal(FACTURX_FILENAME),
        "UF" => Object::string_literal(FACTURX_FILENAME),
        "Desc" => Object::string_literal("Factur-X XML invoice"),
        "AFRelationship" => Object::Name(level.af_relationship().as_bytes().to_vec()),
        "EF" => dictionary! {
            "F" => Object::Reference(payload_id),
            "UF" => Object::Reference(payload_id),
        },
    };
    let filespec_id = doc.add_object(filespec);

    // EmbeddedFiles name tree and the catalog Names dictionary
    let name_tree_id = doc.add_object(dictionary! {
        "Names" => Object::Array(vec![
            Object::string_literal(FACTURX_FILENAME),
            Object::Reference(filespec_id),
        ]),
    });
    let names_id = doc.add_object(dictionary! {
        "EmbeddedFiles" => Object::Reference(name_tree_id),
    });

    // XMP must be stored uncompressed per PDF/A
    let metadata_stream = Stream::new(
        dictionary! {
            "Type" => "Metadata",
            "Subtype" => "XML",
        },
        xmp::build_xmp(level, XMP_LANGUAGE).into_bytes(),
    )
    .with_compression(false);
    let metadata_id = doc.add_object(metadata_stream);

    let catalog = doc
        .catalog_mut()
        .map_err(|e| PipelineError::Embedding(format!("failed to get catalog: {e}")))?;

    catalog.set("AF", Object::Array(vec![Object::Reference(filespec_id)]));
    catalog.set("Names", Object::Reference(names_id));
    catalog.set("Metadata", Object::Reference(metadata_id));
    catalog.set("MarkInfo", dictionary! { "Marked" => Object::Boolean(true) });

    Ok(())
}
