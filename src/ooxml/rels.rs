//! Package relationships (`_rels/*.rels`) and part-name resolution.

use crate::common::error::Result;
use crate::common::xml::attr_value;
use quick_xml::Reader;
use quick_xml::events::Event;
use smallvec::SmallVec;

/// Relationship type suffixes, matched against both transitional and strict
/// namespace URIs.
pub mod rel_types {
    pub const OFFICE_DOCUMENT: &str = "/officeDocument";
    pub const WORKSHEET: &str = "/worksheet";
    pub const SHARED_STRINGS: &str = "/sharedStrings";
    pub const STYLES: &str = "/styles";
}

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    pub external: bool,
}

/// Relationships of one source part.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    /// Directory of the source part, without leading or trailing slash
    base_dir: String,
    items: SmallVec<[Relationship; 8]>,
}

impl Relationships {
    /// Parse a `.rels` part belonging to the source part `source`.
    ///
    /// `source` is an archive entry name such as `xl/workbook.xml`; pass an
    /// empty string for the package-level relationships.
    pub fn parse(xml: &[u8], source: &str) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut items = SmallVec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Empty(ref e) | Event::Start(ref e)
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let decoder = reader.decoder();
                    let id = attr_value(e, b"Id", decoder)?;
                    let rel_type = attr_value(e, b"Type", decoder)?;
                    let target = attr_value(e, b"Target", decoder)?;
                    let external = attr_value(e, b"TargetMode", decoder)?
                        .is_some_and(|mode| mode.eq_ignore_ascii_case("External"));

                    if let (Some(id), Some(rel_type), Some(target)) = (id, rel_type, target) {
                        items.push(Relationship {
                            id,
                            rel_type,
                            target,
                            external,
                        });
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        Ok(Self {
            base_dir: parent_dir(source).to_string(),
            items,
        })
    }

    /// Look up a relationship by its id.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.id == id)
    }

    /// First relationship whose type URI ends with `type_suffix`.
    pub fn first_of_type(&self, type_suffix: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.rel_type.ends_with(type_suffix))
    }

    /// Resolve an internal relationship to an archive entry name.
    pub fn resolve(&self, rel: &Relationship) -> Option<String> {
        if rel.external {
            return None;
        }
        Some(resolve_target(&self.base_dir, &rel.target))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Entry name of the relationships part for `part` (`""` for the package).
pub fn rels_path_for(part: &str) -> String {
    let part = part.trim_start_matches('/');
    match part.rfind('/') {
        Some(pos) => format!("{}/_rels/{}.rels", &part[..pos], &part[pos + 1..]),
        None if part.is_empty() => "_rels/.rels".to_string(),
        None => format!("_rels/{part}.rels"),
    }
}

fn parent_dir(part: &str) -> &str {
    let part = part.trim_start_matches('/');
    part.rfind('/').map_or("", |pos| &part[..pos])
}

/// Join a relationship target onto a base directory and normalize `.`/`..`.
///
/// Absolute targets (leading `/`) are taken from the package root. The result
/// never starts with a slash, matching archive entry names.
pub fn resolve_target(base_dir: &str, target: &str) -> String {
    let joined = if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else if base_dir.is_empty() {
        target.to_string()
    } else {
        format!("{base_dir}/{target}")
    };

    let mut parts: Vec<&str> = Vec::new();
    for part in joined.split('/') {
        match part {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            _ => parts.push(part),
        }
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="/xl/sharedStrings.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_parse_and_resolve() {
        let rels = Relationships::parse(RELS.as_bytes(), "xl/workbook.xml").unwrap();
        assert_eq!(rels.len(), 3);

        let sheet = rels.get("rId1").unwrap();
        assert_eq!(rels.resolve(sheet).as_deref(), Some("xl/worksheets/sheet1.xml"));

        let sst = rels.first_of_type(rel_types::SHARED_STRINGS).unwrap();
        assert_eq!(rels.resolve(sst).as_deref(), Some("xl/sharedStrings.xml"));

        let link = rels.get("rId3").unwrap();
        assert!(link.external);
        assert_eq!(link.target, "https://example.com/?a=1&b=2");
        assert_eq!(rels.resolve(link), None);
    }

    #[test]
    fn test_resolve_target_normalizes() {
        assert_eq!(resolve_target("word", "../customXml/item1.xml"), "customXml/item1.xml");
        assert_eq!(resolve_target("", "./word/document.xml"), "word/document.xml");
        assert_eq!(resolve_target("xl", "/xl/worksheets/sheet2.xml"), "xl/worksheets/sheet2.xml");
    }

    #[test]
    fn test_rels_path_for() {
        assert_eq!(rels_path_for(""), "_rels/.rels");
        assert_eq!(rels_path_for("xl/workbook.xml"), "xl/_rels/workbook.xml.rels");
        assert_eq!(rels_path_for("/word/document.xml"), "word/_rels/document.xml.rels");
    }
}
