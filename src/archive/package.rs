//! Read-only ZIP container handle.
//!
//! Opening parses only the central directory. Entry payloads are decompressed
//! one at a time when [`ArchivePackage::read`] is called, so peak memory stays
//! bounded by the largest entry actually read. The underlying file (or buffer)
//! is released when the handle is dropped, on success and error paths alike.

use crate::common::detection::{
    ContainerFormat, detect_container_format, detect_container_format_from_reader,
};
use crate::common::error::{Error, Result};
use log::debug;
use serde::Serialize;
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

/// Descriptor of one file entry in a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    /// Slash-separated path, unique within the container
    pub path: String,
    /// Uncompressed size in bytes
    pub size: u64,
}

/// An opened archive container.
pub struct ArchivePackage<R> {
    archive: RefCell<ZipArchive<R>>,
    /// Path or archive-relative name used in diagnostics
    label: String,
}

/// A container backed by a file on disk.
pub type FilePackage = ArchivePackage<BufReader<File>>;

/// A container held in memory, typically an entry of another container.
pub type NestedPackage = ArchivePackage<Cursor<Vec<u8>>>;

impl ArchivePackage<BufReader<File>> {
    /// Open a container from a file path.
    ///
    /// The file signature is checked before the central directory is parsed,
    /// so non-archive input fails with [`Error::NotAContainer`] whatever its
    /// extension.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let label = path.display().to_string();

        let mut file = File::open(path)?;
        let format = detect_container_format_from_reader(&mut file)?;
        if format != ContainerFormat::Zip {
            return Err(Error::NotAContainer(format!("{label}: {}", format.describe())));
        }
        file.seek(SeekFrom::Start(0))?;

        Self::from_reader(BufReader::new(file), label)
    }
}

impl ArchivePackage<Cursor<Vec<u8>>> {
    /// Open a container held in memory.
    ///
    /// This is the single entry point for nested containers: a `.docx` stored
    /// inside a plain archive and a workbook embedded in a document both go
    /// through here.
    pub fn open_nested(data: Vec<u8>, label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        let format = detect_container_format(&data);
        if format != ContainerFormat::Zip {
            return Err(Error::NotAContainer(format!("{label}: {}", format.describe())));
        }
        Self::from_reader(Cursor::new(data), label)
    }
}

impl<R: Read + Seek> ArchivePackage<R> {
    fn from_reader(reader: R, label: String) -> Result<Self> {
        let archive = ZipArchive::new(reader)
            .map_err(|e| Error::NotAContainer(format!("{label}: {e}")))?;
        debug!("opened container {label} with {} entries", archive.len());
        Ok(Self {
            archive: RefCell::new(archive),
            label,
        })
    }

    /// Get the label (path or archive-relative name) of this container.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// List all file entries in central-directory order.
    ///
    /// Directory entries are skipped.
    pub fn list_entries(&self) -> Result<Vec<EntryInfo>> {
        let mut archive = self.archive.borrow_mut();
        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let file = archive.by_index_raw(i)?;
            if file.is_dir() {
                continue;
            }
            entries.push(EntryInfo {
                path: file.name().to_string(),
                size: file.size(),
            });
        }
        Ok(entries)
    }

    /// List the paths of all file entries in central-directory order.
    pub fn entry_names(&self) -> Result<Vec<String>> {
        Ok(self.list_entries()?.into_iter().map(|e| e.path).collect())
    }

    /// Check if an entry exists.
    pub fn contains(&self, path: &str) -> bool {
        let normalized = path.strip_prefix('/').unwrap_or(path);
        self.archive.borrow().index_for_name(normalized).is_some()
    }

    /// Read and decompress one entry.
    ///
    /// A leading slash on `path` is ignored, so part names taken from
    /// relationship targets can be passed directly.
    pub fn read(&self, path: &str) -> Result<Vec<u8>> {
        let normalized = path.strip_prefix('/').unwrap_or(path);
        let mut archive = self.archive.borrow_mut();
        let mut file = match archive.by_name(normalized) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => {
                return Err(Error::EntryNotFound(format!("{}!{normalized}", self.label)));
            },
            Err(e) => return Err(e.into()),
        };

        let mut data = Vec::with_capacity(file.size().min(64 * 1024 * 1024) as usize);
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Read an entry if present, mapping absence to `None`.
    pub fn read_optional(&self, path: &str) -> Result<Option<Vec<u8>>> {
        match self.read(path) {
            Ok(data) => Ok(Some(data)),
            Err(Error::EntryNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl<R> std::fmt::Debug for ArchivePackage<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchivePackage")
            .field("label", &self.label)
            .finish()
    }
}
