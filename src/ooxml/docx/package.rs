//! A Word document package: the archive plus the location of its main part.
use super::document_part::DocumentBody;
use crate::archive::ArchivePackage;
use crate::common::error::{Error, Result};
use crate::ooxml::rels::{Relationships, rel_types, rels_path_for};
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Conventional location of the main part, used when the package
/// relationships do not name one.
pub const DEFAULT_MAIN_PART: &str = "word/document.xml";

/// An opened `.docx` package.
///
/// # Example
///
/// ```rust,no_run
/// use longan::ooxml::docx::Package;
///
/// let package = Package::open("document.docx")?;
/// let body = package.body()?;
/// println!("{}", body.text());
/// for table in &body.tables {
///     println!("table {}: {}x{}", table.index, table.rows, table.columns);
/// }
/// # Ok::<(), longan::Error>(())
/// ```
#[derive(Debug)]
pub struct Package<R> {
    archive: ArchivePackage<R>,
    main_part: String,
}

impl Package<BufReader<File>> {
    /// Open a `.docx` file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_archive(ArchivePackage::open(path)?)
    }
}

impl<R: Read + Seek> Package<R> {
    /// Wrap an opened archive, locating its main document part.
    pub fn from_archive(archive: ArchivePackage<R>) -> Result<Self> {
        let main_part = match archive.read_optional(&rels_path_for(""))? {
            Some(xml) => {
                let rels = Relationships::parse(&xml, "")?;
                rels.first_of_type(rel_types::OFFICE_DOCUMENT)
                    .and_then(|rel| rels.resolve(rel))
                    .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string())
            },
            None => DEFAULT_MAIN_PART.to_string(),
        };

        if !archive.contains(&main_part) {
            return Err(Error::MalformedDocument(format!(
                "{}: main document part {main_part} is missing",
                archive.label()
            )));
        }
        debug!("{}: main document part is {main_part}", archive.label());

        Ok(Self { archive, main_part })
    }

    /// The underlying archive.
    #[inline]
    pub fn archive(&self) -> &ArchivePackage<R> {
        &self.archive
    }

    /// Entry name of the main document part.
    #[inline]
    pub fn main_part(&self) -> &str {
        &self.main_part
    }

    /// Parse the main document part.
    pub fn body(&self) -> Result<DocumentBody> {
        let xml = self.archive.read(&self.main_part)?;
        DocumentBody::parse(&xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ErrorKind;
    use crate::test_support::{docx_bytes, document_xml, paragraph, zip_bytes};

    #[test]
    fn test_main_part_from_relationships() {
        let rels = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="/word/document2.xml"/></Relationships>"#;
        let document = document_xml(&paragraph("moved"));
        let data = zip_bytes(&[
            ("_rels/.rels", rels.as_bytes()),
            ("word/document2.xml", document.as_bytes()),
        ]);
        let package = Package::from_archive(ArchivePackage::open_nested(data, "x.docx").unwrap()).unwrap();
        assert_eq!(package.main_part(), "word/document2.xml");
        assert_eq!(package.body().unwrap().text(), "moved");
    }

    #[test]
    fn test_fallback_without_relationships() {
        let document = document_xml(&paragraph("plain"));
        let data = zip_bytes(&[("word/document.xml", document.as_bytes())]);
        let package = Package::from_archive(ArchivePackage::open_nested(data, "x.docx").unwrap()).unwrap();
        assert_eq!(package.main_part(), DEFAULT_MAIN_PART);
    }

    #[test]
    fn test_missing_main_part() {
        let data = zip_bytes(&[("hello.txt", b"hi")]);
        let err = Package::from_archive(ArchivePackage::open_nested(data, "x.docx").unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
    }

    #[test]
    fn test_standard_fixture() {
        let data = docx_bytes(&paragraph("Hello"), &[]);
        let package = Package::from_archive(ArchivePackage::open_nested(data, "x.docx").unwrap()).unwrap();
        assert_eq!(package.body().unwrap().paragraphs, vec!["Hello"]);
    }
}
