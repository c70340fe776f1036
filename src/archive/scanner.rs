//! Entry filtering by path convention.
//!
//! A scan walks the container in central-directory order and yields the
//! payload of every entry accepted by a predicate. Payloads are read one at a
//! time as the iterator advances and are returned untransformed.

use super::package::ArchivePackage;
use crate::common::error::Result;
use log::debug;
use memchr::memmem;
use std::io::{Read, Seek};

/// Image file extensions recognized in plain archives (compared lower-cased).
pub const IMAGE_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".bmp", ".gif", ".tif", ".tiff", ".webp",
];

/// A matched archive entry and its raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveAsset {
    pub path: String,
    pub data: Vec<u8>,
}

/// Lazily reads matching entries from a package.
pub struct AssetIter<'a, R> {
    package: &'a ArchivePackage<R>,
    paths: std::vec::IntoIter<String>,
}

impl<R: Read + Seek> Iterator for AssetIter<'_, R> {
    type Item = Result<ArchiveAsset>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.paths.next()?;
        Some(self.package.read(&path).map(|data| ArchiveAsset { path, data }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.paths.size_hint()
    }
}

/// Select matching entries without reading them yet.
pub fn scan_iter<R, F>(package: &ArchivePackage<R>, predicate: F) -> Result<AssetIter<'_, R>>
where
    R: Read + Seek,
    F: Fn(&str) -> bool,
{
    let paths: Vec<String> = package
        .entry_names()?
        .into_iter()
        .filter(|path| predicate(path.as_str()))
        .collect();
    debug!("{}: {} entries matched scan", package.label(), paths.len());
    Ok(AssetIter {
        package,
        paths: paths.into_iter(),
    })
}

/// Read every entry accepted by `predicate`, in enumeration order.
pub fn scan<R, F>(package: &ArchivePackage<R>, predicate: F) -> Result<Vec<ArchiveAsset>>
where
    R: Read + Seek,
    F: Fn(&str) -> bool,
{
    scan_iter(package, predicate)?.collect()
}

/// Accept entries stored under `prefix` (case-sensitive, as archive paths are).
pub fn media_prefix(prefix: &str) -> impl Fn(&str) -> bool + '_ {
    move |path: &str| path.starts_with(prefix) && path.len() > prefix.len()
}

/// Accept entries whose name ends with a known image extension.
pub fn image_extension(path: &str) -> bool {
    has_extension(path, IMAGE_EXTENSIONS)
}

/// Accept Word documents stored anywhere in an archive.
pub fn docx_extension(path: &str) -> bool {
    has_extension(path, &[".docx"])
}

/// Accept spreadsheet binaries anywhere below `folder` (case-insensitive).
pub fn embedded_workbook(folder: &str) -> impl Fn(&str) -> bool + '_ {
    move |path: &str| {
        let lower = path.to_ascii_lowercase();
        let folder = folder.to_ascii_lowercase();
        memmem::find(lower.as_bytes(), folder.as_bytes()).is_some()
            && (lower.ends_with(".xlsx") || lower.ends_with(".xls"))
    }
}

/// Case-insensitive suffix test against a list of lower-case extensions.
pub fn has_extension(path: &str, extensions: &[&str]) -> bool {
    let lower = path.to_ascii_lowercase();
    extensions.iter().any(|ext| lower.ends_with(ext))
}
