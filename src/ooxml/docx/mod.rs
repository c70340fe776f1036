//! Word (.docx) document support.
//!
//! The main document part is parsed once with a streaming reader to recover
//! two things:
//! - the narrative text of body-level paragraphs
//! - the row/column grid of every top-level table, in document order
//!
//! # Example
//!
//! ```rust,no_run
//! use longan::ooxml::docx::{Package, extract_tables};
//!
//! let package = Package::open("document.docx")?;
//! for table in extract_tables(&package)? {
//!     for row in &table.data {
//!         println!("{}", row.join(" | "));
//!     }
//! }
//! # Ok::<(), longan::Error>(())
//! ```
pub mod document_part;
pub mod package;
pub mod table;

pub use document_part::DocumentBody;
pub use package::Package;
pub use table::{MAX_GRID_COLUMNS, Table, VMergeState};

use crate::common::error::Result;
use std::io::{Read, Seek};

/// Reconstruct the top-level tables of a document, in document order.
pub fn extract_tables<R: Read + Seek>(package: &Package<R>) -> Result<Vec<Table>> {
    Ok(package.body()?.tables)
}

/// Narrative text of a document: non-empty body paragraphs joined by newlines.
pub fn extract_text<R: Read + Seek>(package: &Package<R>) -> Result<String> {
    Ok(package.body()?.text())
}
