//! Office Open XML (OOXML) parts used for content extraction.
//!
//! The module is organized into two layers:
//!
//! 1. **Relationships** (`rels`): `_rels/*.rels` parsing and part-name resolution
//! 2. **Format-Specific Modules**:
//!    - `docx`: narrative text and tables of Word documents
//!    - `xlsx`: workbooks embedded in Word documents
//!
//! Both formats sit on top of [`crate::archive::ArchivePackage`], so a
//! document on disk and a workbook nested inside it are read the same way.
//!
//! # Example: Working with Word Documents
//!
//! ```rust,no_run
//! use longan::ooxml::docx::Package;
//! use longan::ooxml::xlsx::extract_workbooks;
//! use longan::Capabilities;
//!
//! let package = Package::open("document.docx")?;
//! println!("{}", package.body()?.text());
//!
//! for workbook in extract_workbooks(package.archive(), "word/embeddings/", Capabilities::detect())? {
//!     match workbook {
//!         Ok(workbook) => println!("{}: {} sheets", workbook.name, workbook.sheets.len()),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! # Ok::<(), longan::Error>(())
//! ```
pub mod docx;
pub mod rels;
pub mod xlsx;
