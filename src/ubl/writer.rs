use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::Decimal;
use std::io::Cursor;

use crate::core::PipelineError;

fn xml_io(e: std::io::Error) -> PipelineError {
    PipelineError::Mapping(format!("XML write error: {e}"))
}

/// Thin stateful wrapper over quick-xml's event writer, with helpers
/// for the UBL amount/quantity attribute conventions.
pub(crate) struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new() -> Result<Self, PipelineError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_string(self) -> Result<String, PipelineError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| PipelineError::Mapping(format!("XML UTF-8 error: {e}")))
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self, PipelineError> {
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, PipelineError> {
        let mut elem = BytesStart::new(name);
        for (key, value) in attrs {
            elem.push_attribute((*key, *value));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self, PipelineError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, PipelineError> {
        self.start_element(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    pub fn text_element_with_attrs(
        &mut self,
        name: &str,
        text: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, PipelineError> {
        self.start_element_with_attrs(name, attrs)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    /// Amount with the mandatory currencyID attribute.
    pub fn amount_element(
        &mut self,
        name: &str,
        amount: Decimal,
        currency: &str,
    ) -> Result<&mut Self, PipelineError> {
        self.text_element_with_attrs(name, &format_decimal(amount), &[("currencyID", currency)])
    }

    /// Quantity with the mandatory unitCode attribute.
    pub fn quantity_element(
        &mut self,
        name: &str,
        quantity: Decimal,
        unit: &str,
    ) -> Result<&mut Self, PipelineError> {
        self.text_element_with_attrs(name, &format_decimal(quantity), &[("unitCode", unit)])
    }
}

/// Decimal rendering for XML amounts: strip trailing zeros but keep at
/// least two fractional digits.
pub(crate) fn format_decimal(d: Decimal) -> String {
    let s = d.normalize().to_string();
    match s.find('.') {
        Some(dot) => {
            let decimals = s.len() - dot - 1;
            if decimals < 2 {
                format!("{s}{}", "0".repeat(2 - decimals))
            } else {
                s
            }
        }
        None => format!("{s}.00"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn format_decimal_cases() {
        assert_eq!(format_decimal(dec!(1250)), "1250.00");
        assert_eq!(format_decimal(dec!(237.5)), "237.50");
        assert_eq!(format_decimal(dec!(1487.50)), "1487.50");
        assert_eq!(format_decimal(dec!(0)), "0.00");
        assert_eq!(format_decimal(dec!(0.005)), "0.005");
        assert_eq!(format_decimal(dec!(19)), "19.00");
    }

    #[test]
    fn writer_escapes_text() {
        let mut w = XmlWriter::new().unwrap();
        w.start_element("root").unwrap();
        w.text_element("cbc:Note", "Kaffee & Kuchen <19%>").unwrap();
        w.end_element("root").unwrap();
        let xml = w.into_string().unwrap();
        assert!(xml.contains("Kaffee &amp; Kuchen &lt;19%&gt;"));
    }
}
