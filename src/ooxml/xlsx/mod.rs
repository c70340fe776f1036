//! Spreadsheets (.xlsx) embedded in documents.
//!
//! Word stores an embedded workbook whole, as a complete `.xlsx` archive
//! under `word/embeddings/`. Each one is opened as a nested container and
//! every worksheet is decoded into rows of cell text:
//!
//! - sheets keep workbook order
//! - rows without any value are skipped, absent cells become `""`
//! - a sheet that ends up with no rows is left out
//!
//! One failing workbook turns into an error record for that entry only.

#[cfg(feature = "xlsx")]
pub mod cell;
#[cfg(feature = "xlsx")]
pub mod shared_strings;
#[cfg(feature = "xlsx")]
pub mod styles;
#[cfg(feature = "xlsx")]
pub mod workbook;
#[cfg(feature = "xlsx")]
pub mod worksheet;

use crate::archive::ArchivePackage;
use crate::common::Capabilities;
use crate::common::error::{ItemResult, Result};
use serde::Serialize;
use std::io::{Read, Seek};

/// One worksheet reduced to a grid of cell text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    pub data: Vec<Vec<String>>,
}

/// A decoded embedded workbook, named by its archive path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workbook {
    pub name: String,
    pub sheets: Vec<Sheet>,
}

/// Decode every workbook embedded in a document container.
///
/// Entries are matched case-insensitively: the path must contain
/// `embeddings_prefix` and end in `.xlsx` or `.xls`. The result has one
/// element per match, in enumeration order. Listing the container is the
/// only failure that aborts the call.
///
/// Without the `workbooks` capability the result is always empty.
pub fn extract_workbooks<R: Read + Seek>(
    package: &ArchivePackage<R>,
    embeddings_prefix: &str,
    capabilities: Capabilities,
) -> Result<Vec<ItemResult<Workbook>>> {
    if !capabilities.workbooks {
        return Ok(Vec::new());
    }
    decode_all(package, embeddings_prefix)
}

#[cfg(feature = "xlsx")]
fn decode_all<R: Read + Seek>(
    package: &ArchivePackage<R>,
    embeddings_prefix: &str,
) -> Result<Vec<ItemResult<Workbook>>> {
    use crate::archive::scanner::embedded_workbook;
    use log::{debug, warn};

    let matches = embedded_workbook(embeddings_prefix);
    let names: Vec<String> = package
        .entry_names()?
        .into_iter()
        .filter(|name| matches(name.as_str()))
        .collect();
    debug!("{}: {} embedded workbooks", package.label(), names.len());

    let mut workbooks = Vec::with_capacity(names.len());
    for name in names {
        let result = package
            .read(&name)
            .and_then(|data| ArchivePackage::open_nested(data, name.clone()))
            .and_then(|nested| workbook::read_workbook(&nested));
        match result {
            Ok(workbook) => workbooks.push(Ok(workbook)),
            Err(e) => {
                warn!("failed to read embedded workbook {name}: {e}");
                workbooks.push(Err(e.into_item(name)));
            },
        }
    }
    Ok(workbooks)
}

#[cfg(not(feature = "xlsx"))]
fn decode_all<R: Read + Seek>(
    _package: &ArchivePackage<R>,
    _embeddings_prefix: &str,
) -> Result<Vec<ItemResult<Workbook>>> {
    Ok(Vec::new())
}
