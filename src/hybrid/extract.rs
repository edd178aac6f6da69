use lopdf::{Dictionary, Document, Object};

use crate::core::PipelineError;

/// Recover the embedded invoice XML from a hybrid PDF.
///
/// Looks the attachment up through the EmbeddedFiles name tree first and
/// falls back to the catalog's AF array, matching the attachment by its
/// conventional filename.
pub fn extract_invoice_xml(pdf_bytes: &[u8]) -> Result<String, PipelineError> {
    let doc = Document::load_mem(pdf_bytes)
        .map_err(|e| PipelineError::Embedding(format!("failed to load PDF: {e}")))?;

    find_via_name_tree(&doc)
        .or_else(|_| find_via_af_array(&doc))
        .map_err(|e| PipelineError::Embedding(format!("no embedded invoice XML found: {e}")))
}

fn find_via_name_tree(doc: &Document) -> Result<String, String> {
    let catalog = doc.catalog().map_err(|e| e.to_string())?;
    let names = deref_dict(doc, catalog.get(b"Names").map_err(|e| e.to_string())?)?;
    let tree = deref_dict(doc, names.get(b"EmbeddedFiles").map_err(|e| e.to_string())?)?;
    let entries = tree
        .get(b"Names")
        .map_err(|e| e.to_string())?
        .as_array()
        .map_err(|e| e.to_string())?;

    // Entries alternate: name, filespec reference
    for pair in entries.chunks(2) {
        let [name_obj, filespec_obj] = pair else {
            continue;
        };
        if literal_string(name_obj).is_some_and(|n| is_invoice_attachment(&n)) {
            let filespec = deref_dict(doc, filespec_obj)?;
            return read_payload(doc, filespec);
        }
    }

    Err("attachment missing from EmbeddedFiles name tree".to_string())
}

fn find_via_af_array(doc: &Document) -> Result<String, String> {
    let catalog = doc.catalog().map_err(|e| e.to_string())?;
    let af = catalog
        .get(b"AF")
        .map_err(|e| e.to_string())?
        .as_array()
        .map_err(|e| e.to_string())?;

    for entry in af {
        let filespec = deref_dict(doc, entry)?;
        let filename = filespec
            .get(b"UF")
            .or_else(|_| filespec.get(b"F"))
            .ok()
            .and_then(literal_string)
            .unwrap_or_default();
        if is_invoice_attachment(&filename) {
            return read_payload(doc, filespec);
        }
    }

    Err("attachment missing from AF array".to_string())
}

fn read_payload(doc: &Document, filespec: &Dictionary) -> Result<String, String> {
    let ef = deref_dict(doc, filespec.get(b"EF").map_err(|e| e.to_string())?)?;
    let stream_obj = match ef.get(b"F").map_err(|e| e.to_string())? {
        Object::Reference(id) => doc.get_object(*id).map_err(|e| e.to_string())?,
        other => other,
    };
    let stream = stream_obj.as_stream().map_err(|e| e.to_string())?;

    // Uncompressed streams have no Filter key and make
    // decompressed_content() fail; fall back to the raw bytes then.
    let content = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());
    String::from_utf8(content).map_err(|e| e.to_string())
}

fn deref_dict<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Dictionary, String> {
    match obj {
        Object::Reference(id) => doc.get_dictionary(*id).map_err(|e| e.to_string()),
        Object::Dictionary(dict) => Ok(dict),
        _ => Err("expected dictionary or reference".to_string()),
    }
}

fn literal_string(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

fn is_invoice_attachment(name: &str) -> bool {
    name.eq_ignore_ascii_case(super::FACTURX_FILENAME)
}
