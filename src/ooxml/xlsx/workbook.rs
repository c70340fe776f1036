//! Decoding of one workbook package into sheets of cell text.

use super::shared_strings::SharedStrings;
use super::styles::CellStyles;
use super::worksheet::{SheetContext, parse_rows};
use super::{Sheet, Workbook};
use crate::archive::ArchivePackage;
use crate::common::error::{Error, Result};
use crate::common::xml::attr_value;
use crate::ooxml::rels::{Relationships, rel_types, rels_path_for};
use log::{debug, warn};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Read, Seek};

/// Conventional workbook part, used when the package relationships do not
/// name one.
const DEFAULT_WORKBOOK_PART: &str = "xl/workbook.xml";

/// A `<sheet>` entry of `xl/workbook.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEntry {
    pub name: String,
    pub rel_id: String,
}

/// Contents of `xl/workbook.xml` relevant to decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkbookPart {
    /// Sheets in workbook order
    pub sheets: Vec<SheetEntry>,
    pub date1904: bool,
}

impl WorkbookPart {
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut part = WorkbookPart::default();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let decoder = reader.decoder();
                    match e.local_name().as_ref() {
                        b"workbookPr" => {
                            part.date1904 = attr_value(e, b"date1904", decoder)?
                                .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
                        },
                        b"sheet" => {
                            let name = attr_value(e, b"name", decoder)?;
                            let rel_id = attr_value(e, b"id", decoder)?;
                            if let (Some(name), Some(rel_id)) = (name, rel_id) {
                                part.sheets.push(SheetEntry { name, rel_id });
                            }
                        },
                        _ => {},
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        Ok(part)
    }
}

/// Decode every worksheet of a workbook package.
///
/// Sheets come back in workbook order. A sheet without any non-blank row is
/// left out.
pub fn read_workbook<R: Read + Seek>(package: &ArchivePackage<R>) -> Result<Workbook> {
    let workbook_part = locate_workbook_part(package)?;
    let part = WorkbookPart::parse(&package.read(&workbook_part)?)?;
    let rels = match package.read_optional(&rels_path_for(&workbook_part))? {
        Some(xml) => Relationships::parse(&xml, &workbook_part)?,
        None => Relationships::default(),
    };

    let shared_strings = match read_related(package, &rels, rel_types::SHARED_STRINGS, "xl/sharedStrings.xml")? {
        Some(xml) => SharedStrings::parse(&xml)?,
        None => SharedStrings::new(),
    };
    let styles = match read_related(package, &rels, rel_types::STYLES, "xl/styles.xml")? {
        Some(xml) => CellStyles::parse(&xml)?,
        None => CellStyles::default(),
    };
    let ctx = SheetContext {
        shared_strings: &shared_strings,
        styles: &styles,
        date1904: part.date1904,
    };

    let mut sheets = Vec::with_capacity(part.sheets.len());
    for entry in &part.sheets {
        let Some(rel) = rels.get(&entry.rel_id) else {
            warn!("{}: sheet '{}' has no relationship {}", package.label(), entry.name, entry.rel_id);
            continue;
        };
        if !rel.rel_type.ends_with(rel_types::WORKSHEET) {
            debug!("{}: skipping non-worksheet sheet '{}'", package.label(), entry.name);
            continue;
        }
        let Some(target) = rels.resolve(rel) else {
            continue;
        };

        let data = parse_rows(&package.read(&target)?, &ctx)?;
        if data.is_empty() {
            continue;
        }
        sheets.push(Sheet {
            name: entry.name.clone(),
            rows: data.len(),
            columns: data[0].len(),
            data,
        });
    }

    Ok(Workbook {
        name: package.label().to_string(),
        sheets,
    })
}

fn locate_workbook_part<R: Read + Seek>(package: &ArchivePackage<R>) -> Result<String> {
    let part = match package.read_optional(&rels_path_for(""))? {
        Some(xml) => {
            let rels = Relationships::parse(&xml, "")?;
            rels.first_of_type(rel_types::OFFICE_DOCUMENT)
                .and_then(|rel| rels.resolve(rel))
                .unwrap_or_else(|| DEFAULT_WORKBOOK_PART.to_string())
        },
        None => DEFAULT_WORKBOOK_PART.to_string(),
    };
    if package.contains(&part) {
        Ok(part)
    } else {
        Err(Error::MalformedDocument(format!("{}: workbook part {part} is missing", package.label())))
    }
}

fn read_related<R: Read + Seek>(
    package: &ArchivePackage<R>,
    rels: &Relationships,
    type_suffix: &str,
    fallback: &str,
) -> Result<Option<Vec<u8>>> {
    let path = rels
        .first_of_type(type_suffix)
        .and_then(|rel| rels.resolve(rel))
        .unwrap_or_else(|| fallback.to_string());
    package.read_optional(&path)
}
