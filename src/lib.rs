//! Longan - content extraction for Word documents
//!
//! This library opens a `.docx` as the ZIP container it is and pulls out
//! what a reader or a downstream tool needs from it:
//!
//! # Features
//!
//! - **Narrative text**: body-level paragraphs, in document order
//! - **Tables**: the row/column grid of every top-level table
//! - **Embedded workbooks**: spreadsheets stored under `word/embeddings/`,
//!   decoded sheet by sheet (`xlsx` feature)
//! - **Media**: image payloads of a document, or of a plain archive and the
//!   documents inside it, with format and size metadata (`imgconv` feature)
//! - **Composite preview**: one labeled plain-text rendering with a
//!   character budget
//!
//! Failures of a single embedded item (one workbook, one nested document,
//! one image's metadata) are reported next to the successful items instead
//! of failing the whole call.
//!
//! # Example - Reading a DOCX file
//!
//! ```no_run
//! use longan::{Capabilities, ExtractOptions, Extractor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = Extractor::new(Capabilities::detect(), ExtractOptions::default());
//! let content = extractor.extract_text("document.docx")?;
//!
//! println!("Document text: {}", content.text);
//! for table in &content.tables {
//!     println!("Table {}: {} rows x {} columns", table.index, table.rows, table.columns);
//! }
//! for workbook in &content.workbooks {
//!     match workbook {
//!         Ok(workbook) => println!("Workbook {} has {} sheets", workbook.name, workbook.sheets.len()),
//!         Err(e) => eprintln!("Skipped: {e}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Exporting images from an archive
//!
//! ```no_run
//! use longan::Extractor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let export = Extractor::default().export_archive_images("bundle.zip", "pictures")?;
//! for image in &export.images {
//!     println!("{} <- {}", image.path.display(), image.source.location());
//! }
//! # Ok(())
//! # }
//! ```

/// Container access: opening archives and scanning their entries
pub mod archive;

/// Common types, errors, options and capabilities shared across modules
pub mod common;

/// Composite plain-text rendering with a bounded preview
pub mod content;

/// Writing extracted images and resolving caller paths
pub mod export;

/// Configured entry points composing the other modules
pub mod extract;

/// Image assets and metadata probing
pub mod images;

/// OOXML document and workbook parsing
///
/// This module provides functionality to read Word documents (.docx) and the
/// spreadsheets (.xlsx) embedded in them.
pub mod ooxml;

#[cfg(test)]
pub(crate) mod test_support;

pub use common::{Capabilities, Error, ErrorKind, ExtractOptions, ItemError, ItemResult, Result};
pub use content::CompositeContent;
pub use extract::{ArchiveExport, DocumentContent, Extractor, TableContent};
pub use images::{AssetSource, ImageAsset, ImageInfo};
pub use ooxml::docx::Table;
pub use ooxml::xlsx::{Sheet, Workbook};
