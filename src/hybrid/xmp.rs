use super::FACTURX_FILENAME;
use super::profile::ConformanceLevel;

/// Assemble the XMP metadata packet marking the container as PDF/A-3
/// with the Factur-X extension schema.
///
/// The packet must be stored uncompressed; the embedder takes care of
/// that.
pub(crate) fn build_xmp(level: ConformanceLevel, language: &str) -> String {
    format!(
        "{header}{pdfa_id}{title}{extension}{facturx}{footer}",
        header = format!(
            "<?xpacket begin=\"{}\" id=\"W5M0MpCehiHzreSzNTczkc9d\"?>\n\
             <x:xmpmeta xmlns:x=\"adobe:ns:meta/\">\n\
             <rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">\n",
            '\u{FEFF}'
        ),
        pdfa_id = "<rdf:Description rdf:about=\"\" xmlns:pdfaid=\"http://www.aiim.org/pdfa/ns/id/\">\n\
             <pdfaid:part>3</pdfaid:part>\n\
             <pdfaid:conformance>B</pdfaid:conformance>\n\
             </rdf:Description>\n",
        title = format!(
            "<rdf:Description rdf:about=\"\" xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\n\
             <dc:title><rdf:Alt><rdf:li xml:lang=\"{language}\">Hybrid electronic invoice</rdf:li></rdf:Alt></dc:title>\n\
             </rdf:Description>\n"
        ),
        extension = extension_schema(),
        facturx = format!(
            "<rdf:Description rdf:about=\"\" xmlns:fx=\"urn:factur-x:pdfa:CrossIndustryDocument:invoice:1p0#\">\n\
             <fx:DocumentType>INVOICE</fx:DocumentType>\n\
             <fx:DocumentFileName>{FACTURX_FILENAME}</fx:DocumentFileName>\n\
             <fx:Version>1.0</fx:Version>\n\
             <fx:ConformanceLevel>{}</fx:ConformanceLevel>\n\
             </rdf:Description>\n",
            level.xmp_level()
        ),
        footer = "</rdf:RDF>\n</x:xmpmeta>\n<?xpacket end=\"w\"?>",
    )
}

/// PDF/A extension schema declaring the four Factur-X properties, as
/// required for the fx namespace to be valid inside PDF/A-3.
fn extension_schema() -> String {
    let properties = [
        ("DocumentFileName", "name of the embedded XML invoice file"),
        ("DocumentType", "INVOICE"),
        ("Version", "version of the embedded XML schema"),
        ("ConformanceLevel", "conformance level of the embedded data"),
    ];

    let items: String = properties
        .iter()
        .map(|(name, description)| {
            format!(
                "<rdf:li rdf:parseType=\"Resource\">\n\
                 <pdfaProperty:name>{name}</pdfaProperty:name>\n\
                 <pdfaProperty:valueType>Text</pdfaProperty:valueType>\n\
                 <pdfaProperty:category>external</pdfaProperty:category>\n\
                 <pdfaProperty:description>{description}</pdfaProperty:description>\n\
                 </rdf:li>\n"
            )
        })
        .collect();

    format!(
        "<rdf:Description rdf:about=\"\" \
         xmlns:pdfaExtension=\"http://www.aiim.org/pdfa/ns/extension/\" \
         xmlns:pdfaSchema=\"http://www.aiim.org/pdfa/ns/schema#\" \
         xmlns:pdfaProperty=\"http://www.aiim.org/pdfa/ns/property#\">\n\
         <pdfaExtension:schemas><rdf:Bag><rdf:li rdf:parseType=\"Resource\">\n\
         <pdfaSchema:schema>Factur-X PDFA Extension Schema</pdfaSchema:schema>\n\
         <pdfaSchema:namespaceURI>urn:factur-x:pdfa:CrossIndustryDocument:invoice:1p0#</pdfaSchema:namespaceURI>\n\
         <pdfaSchema:prefix>fx</pdfaSchema:prefix>\n\
         <pdfaSchema:property><rdf:Seq>\n\
         {items}\
         </rdf:Seq></pdfaSchema:property>\n\
         </rdf:li></rdf:Bag></pdfaExtension:schemas>\n\
         </rdf:Description>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_pdfa3_and_level() {
        let xmp = build_xmp(ConformanceLevel::Extended, "en");
        assert!(xmp.contains("<pdfaid:part>3</pdfaid:part>"));
        assert!(xmp.contains("<fx:ConformanceLevel>EXTENDED</fx:ConformanceLevel>"));
        assert!(xmp.contains("<fx:DocumentFileName>factur-x.xml</fx:DocumentFileName>"));
        assert!(xmp.starts_with("<?xpacket"));
        assert!(xmp.ends_with("<?xpacket end=\"w\"?>"));
    }

    #[test]
    fn language_tag_lands_in_title() {
        let xmp = build_xmp(ConformanceLevel::En16931, "de");
        assert!(xmp.contains("xml:lang=\"de\""));
        assert!(xmp.contains("<fx:ConformanceLevel>EN 16931</fx:ConformanceLevel>"));
    }
}
