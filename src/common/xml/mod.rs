//! Streaming XML helpers shared by the document and workbook parsers.
//!
//! `quick-xml` reports entity and character references (`&amp;`, `&#x41;`)
//! as separate events, so text accumulation has to stitch them back in.

use crate::common::error::Result;
use quick_xml::encoding::Decoder;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, BytesText};

/// Append a decoded text event to `out`.
#[inline]
pub(crate) fn push_text(out: &mut String, text: &BytesText<'_>) -> Result<()> {
    out.push_str(&text.decode()?);
    Ok(())
}

/// Append the replacement for an entity or character reference to `out`.
///
/// Unknown named entities are kept verbatim.
pub(crate) fn push_reference(out: &mut String, reference: &BytesRef<'_>) -> Result<()> {
    if let Some(ch) = reference.resolve_char_ref()? {
        out.push(ch);
        return Ok(());
    }
    let name = reference.decode()?;
    match resolve_predefined_entity(&name) {
        Some(resolved) => out.push_str(resolved),
        None => {
            out.push('&');
            out.push_str(&name);
            out.push(';');
        },
    }
    Ok(())
}

/// Look up an attribute by local name (namespace prefix ignored) and return
/// its unescaped value.
pub(crate) fn attr_value(
    element: &BytesStart<'_>,
    local_name: &[u8],
    decoder: Decoder,
) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == local_name {
            let value = attr.decode_and_unescape_value(decoder)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    fn collect_text(xml: &str) -> String {
        let mut reader = Reader::from_str(xml);
        let mut out = String::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Text(e) => push_text(&mut out, &e).unwrap(),
                Event::GeneralRef(e) => push_reference(&mut out, &e).unwrap(),
                Event::Eof => break,
                _ => {},
            }
        }
        out
    }

    #[test]
    fn test_references_are_stitched_into_text() {
        assert_eq!(collect_text("<t>A &amp; B</t>"), "A & B");
        assert_eq!(collect_text("<t>&lt;x&gt; &#65;&#x42;</t>"), "<x> AB");
    }

    #[test]
    fn test_attr_value_ignores_prefix() {
        let mut reader = Reader::from_str(r#"<sheet name="Q1 &amp; Q2" r:id="rId3"/>"#);
        match reader.read_event().unwrap() {
            Event::Empty(e) => {
                let decoder = reader.decoder();
                assert_eq!(attr_value(&e, b"name", decoder).unwrap().as_deref(), Some("Q1 & Q2"));
                assert_eq!(attr_value(&e, b"id", decoder).unwrap().as_deref(), Some("rId3"));
                assert_eq!(attr_value(&e, b"missing", decoder).unwrap(), None);
            },
            other => panic!("unexpected event {other:?}"),
        }
    }
}
