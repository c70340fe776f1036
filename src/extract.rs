//! Per-call entry points composing the archive, document, workbook and
//! image components.
//!
//! An [`Extractor`] carries only configuration: the resolved
//! [`Capabilities`] and the [`ExtractOptions`]. Every call opens its input,
//! builds a fresh result and releases the input before returning, so one
//! extractor can serve any number of calls, including from several threads.

use crate::archive::ArchivePackage;
use crate::common::error::{ItemError, ItemResult, Result};
use crate::common::{Capabilities, ExtractOptions};
use crate::content::{CompositeContent, aggregate};
use crate::export::{ExportScheme, ExportedImage, ImageExporter};
use crate::images::{self, ArchiveImages, ImageAsset};
use crate::ooxml::docx::{Package, Table};
use crate::ooxml::xlsx::{Workbook, extract_workbooks};
use log::debug;
use serde::Serialize;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

/// Everything extracted from one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentContent {
    /// Narrative text of body-level paragraphs
    pub text: String,
    pub tables: Vec<Table>,
    /// One entry per embedded workbook, failed ones included
    pub workbooks: Vec<ItemResult<Workbook>>,
    pub composite: CompositeContent,
}

/// Tables of a document plus its embedded workbooks.
#[derive(Debug, Clone, Serialize)]
pub struct TableContent {
    pub tables: Vec<Table>,
    pub workbooks: Vec<ItemResult<Workbook>>,
}

/// Images written to disk from a plain archive.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveExport {
    pub output_dir: PathBuf,
    pub images: Vec<ExportedImage>,
    /// Nested documents that could not be opened
    pub errors: Vec<ItemError>,
}

/// Configured extraction entry points.
///
/// # Example
///
/// ```rust,no_run
/// use longan::{Capabilities, ExtractOptions, Extractor};
///
/// let extractor = Extractor::new(Capabilities::detect(), ExtractOptions::default().with_max_chars(2000));
/// let content = extractor.extract_text("report.docx")?;
/// println!("{} ({} chars)", content.composite.preview, content.composite.chars);
/// # Ok::<(), longan::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    capabilities: Capabilities,
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(capabilities: Capabilities, options: ExtractOptions) -> Self {
        Self {
            capabilities,
            options,
        }
    }

    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    #[inline]
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract text, tables, workbooks and the composite of a document file.
    pub fn extract_text<P: AsRef<Path>>(&self, path: P) -> Result<DocumentContent> {
        self.document_content(&Package::open(path)?)
    }

    /// Same as [`Extractor::extract_text`] for a document held in memory.
    pub fn extract_text_from_bytes(&self, data: Vec<u8>, label: &str) -> Result<DocumentContent> {
        let package = Package::from_archive(ArchivePackage::open_nested(data, label)?)?;
        self.document_content(&package)
    }

    /// Extract the tables of a document file, plus its embedded workbooks
    /// when `include_workbooks` is set.
    pub fn extract_tables<P: AsRef<Path>>(&self, path: P) -> Result<TableContent> {
        let package = Package::open(path)?;
        let tables = package.body()?.tables;
        let workbooks = self.workbooks(&package)?;
        Ok(TableContent { tables, workbooks })
    }

    /// Collect the media images of a document file.
    pub fn extract_document_images<P: AsRef<Path>>(&self, path: P) -> Result<Vec<ImageAsset>> {
        let archive = ArchivePackage::open(path)?;
        images::document_images(&archive, &self.options.media_prefix, self.capabilities)
    }

    /// Collect images from a plain archive: loose image files, then the
    /// media of every document inside it.
    pub fn extract_archive_images<P: AsRef<Path>>(&self, path: P) -> Result<ArchiveImages> {
        let archive = ArchivePackage::open(path)?;
        images::archive_images(&archive, &self.options.media_prefix, self.capabilities)
    }

    /// Write the media images of a document into `output_dir`.
    pub fn export_document_images<P, Q>(&self, path: P, output_dir: Q) -> Result<Vec<ExportedImage>>
    where
        P: AsRef<Path>,
        Q: Into<PathBuf>,
    {
        let assets = self.extract_document_images(path)?;
        let mut exporter = ImageExporter::new(output_dir, ExportScheme::Document)?;
        exporter.export_all(&assets)
    }

    /// Write the images of a plain archive into `output_dir`.
    pub fn export_archive_images<P, Q>(&self, path: P, output_dir: Q) -> Result<ArchiveExport>
    where
        P: AsRef<Path>,
        Q: Into<PathBuf>,
    {
        let found = self.extract_archive_images(path)?;
        let mut exporter = ImageExporter::new(output_dir, ExportScheme::Archive)?;
        let images = exporter.export_all(&found.images)?;
        Ok(ArchiveExport {
            output_dir: exporter.dir().to_path_buf(),
            images,
            errors: found.errors,
        })
    }

    fn document_content<R: Read + Seek>(&self, package: &Package<R>) -> Result<DocumentContent> {
        let body = package.body()?;
        let text = body.text();
        let workbooks = self.workbooks(package)?;
        let composite = aggregate(&text, &body.tables, &workbooks, &self.options);
        debug!(
            "{}: {} chars, {} tables, {} workbooks",
            package.archive().label(),
            composite.chars,
            body.tables.len(),
            workbooks.len()
        );

        Ok(DocumentContent {
            text,
            tables: body.tables,
            workbooks,
            composite,
        })
    }

    fn workbooks<R: Read + Seek>(&self, package: &Package<R>) -> Result<Vec<ItemResult<Workbook>>> {
        if !self.options.include_workbooks {
            return Ok(Vec::new());
        }
        extract_workbooks(package.archive(), &self.options.embeddings_prefix, self.capabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ErrorKind;
    use crate::test_support::{docx_bytes, paragraph, table};

    #[test]
    fn test_text_and_tables_from_bytes() {
        let body = format!("{}{}", paragraph("Intro"), table(&[&["A", "B", "C"], &["1", "2", "3"]]));
        let data = docx_bytes(&body, &[]);
        let content = Extractor::default().extract_text_from_bytes(data, "mem.docx").unwrap();

        assert_eq!(content.text, "Intro");
        assert_eq!(content.tables.len(), 1);
        assert!(content.workbooks.is_empty());
        assert!(content.composite.full.contains("A | B | C"));
    }

    #[test]
    fn test_workbooks_can_be_switched_off() {
        let data = docx_bytes("", &[("word/embeddings/Bad.xlsx", b"garbage")]);
        let on = Extractor::new(Capabilities::detect(), ExtractOptions::default());
        let off = Extractor::new(Capabilities::detect(), ExtractOptions::default().with_workbooks(false));

        let content = off.extract_text_from_bytes(data.clone(), "mem.docx").unwrap();
        assert!(content.workbooks.is_empty());
        assert!(content.composite.is_empty());

        let content = on.extract_text_from_bytes(data, "mem.docx").unwrap();
        if cfg!(feature = "xlsx") {
            assert_eq!(content.workbooks.len(), 1);
            assert!(content.composite.full.contains("Workbook read error"));
        }
    }

    #[test]
    fn test_not_a_document() {
        let err = Extractor::default()
            .extract_text_from_bytes(b"plain text".to_vec(), "notes.docx")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAContainer);
    }
}
