//! Archive access for documents, plain archives and nested containers.
//!
//! - [`package`]: opening a container and reading its entries on demand
//! - [`scanner`]: filtering entries by path convention and reading matches
//!
//! # Example
//!
//! ```rust,no_run
//! use longan::archive::{ArchivePackage, scanner};
//!
//! let package = ArchivePackage::open("report.docx")?;
//! for asset in scanner::scan(&package, scanner::media_prefix("word/media/"))? {
//!     println!("{}: {} bytes", asset.path, asset.data.len());
//! }
//! # Ok::<(), longan::Error>(())
//! ```

pub mod package;
pub mod scanner;

pub use package::{ArchivePackage, EntryInfo, FilePackage, NestedPackage};
pub use scanner::{ArchiveAsset, AssetIter};
