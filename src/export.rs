//! Writing extracted images to disk and resolving caller-supplied paths.
//!
//! Output files are numbered sequentially across one export:
//! `docx_img_001.png`, `zip_img_002.jpg`, `zip_docx_img_003.png`, ...

use crate::archive::scanner;
use crate::common::Capabilities;
use crate::common::error::{Error, ItemResult, Result};
use crate::images::{AssetSource, ImageAsset, ImageInfo, probe};
use log::{debug, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension used when an entry name carries none.
pub const FALLBACK_EXTENSION: &str = ".png";

/// Resolve an input file against a working directory.
///
/// Relative paths are joined onto `working_dir`. The file must exist and,
/// when `expected_ext` is given (for example `".docx"`), carry that
/// extension in any letter case.
pub fn resolve_input(
    path: impl AsRef<Path>,
    working_dir: impl AsRef<Path>,
    expected_ext: Option<&str>,
) -> Result<PathBuf> {
    let path = path.as_ref();
    let resolved = resolve_against(path, working_dir.as_ref())?;

    if !resolved.is_file() {
        return Err(Error::InvalidInput(format!(
            "file not found: {} (tried {})",
            path.display(),
            resolved.display()
        )));
    }
    if let Some(expected) = expected_ext {
        let actual = resolved
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(Error::InvalidInput(format!(
                "expected a {expected} file, got {}",
                path.display()
            )));
        }
    }
    Ok(resolved)
}

/// Resolve an existing directory against a working directory.
pub fn resolve_dir(path: impl AsRef<Path>, working_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let resolved = resolve_against(path, working_dir.as_ref())?;
    if !resolved.exists() {
        return Err(Error::InvalidInput(format!("directory not found: {}", path.display())));
    }
    if !resolved.is_dir() {
        return Err(Error::InvalidInput(format!("not a directory: {}", path.display())));
    }
    Ok(resolved)
}

/// Resolve an output location; nothing is created or checked.
pub fn resolve_output(path: impl AsRef<Path>, working_dir: impl AsRef<Path>) -> Result<PathBuf> {
    resolve_against(path.as_ref(), working_dir.as_ref())
}

fn resolve_against(path: &Path, working_dir: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    if !working_dir.is_dir() {
        return Err(Error::InvalidInput(format!(
            "working directory not found: {}",
            working_dir.display()
        )));
    }
    Ok(working_dir.join(path))
}

/// An image written by [`ImageExporter`].
#[derive(Debug, Clone, Serialize)]
pub struct ExportedImage {
    /// Written file
    pub path: PathBuf,
    pub source: AssetSource,
    pub metadata: ItemResult<ImageInfo>,
}

/// Naming scheme for exported files, by where the images came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScheme {
    /// Media of a single document (`docx_img_NNN`)
    Document,
    /// Loose images of an archive (`zip_img_NNN`) and media of documents
    /// inside it (`zip_docx_img_NNN`)
    Archive,
}

impl ExportScheme {
    fn prefix(self, source: &AssetSource) -> &'static str {
        match (self, source) {
            (ExportScheme::Document, _) => "docx_img",
            (ExportScheme::Archive, AssetSource::Archive { .. }) => "zip_img",
            (ExportScheme::Archive, AssetSource::EmbeddedDocument { .. }) => "zip_docx_img",
        }
    }
}

/// Writes image payloads into one directory with sequential names.
#[derive(Debug)]
pub struct ImageExporter {
    dir: PathBuf,
    scheme: ExportScheme,
    written: usize,
}

impl ImageExporter {
    /// Create the exporter, creating `dir` and its parents when missing.
    pub fn new(dir: impl Into<PathBuf>, scheme: ExportScheme) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            scheme,
            written: 0,
        })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of files written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// File name the next export of `asset` will get.
    pub fn next_name(&self, asset: &ImageAsset) -> String {
        let ext = asset.extension().unwrap_or_else(|| FALLBACK_EXTENSION.to_string());
        format!("{}_{:03}{ext}", self.scheme.prefix(&asset.source), self.written + 1)
    }

    /// Write one asset's bytes unchanged.
    pub fn export(&mut self, asset: &ImageAsset) -> Result<ExportedImage> {
        let path = self.dir.join(self.next_name(asset));
        fs::write(&path, &asset.data)?;
        self.written += 1;
        debug!("wrote {} ({} bytes)", path.display(), asset.data.len());

        Ok(ExportedImage {
            path,
            source: asset.source.clone(),
            metadata: asset.metadata.clone(),
        })
    }

    /// Write every asset in order.
    pub fn export_all(&mut self, assets: &[ImageAsset]) -> Result<Vec<ExportedImage>> {
        assets.iter().map(|asset| self.export(asset)).collect()
    }
}

/// Format and size tags of one image file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageTags {
    pub path: PathBuf,
    pub info: ImageInfo,
    /// Lower-case format and `WxH`
    pub tags: Vec<String>,
}

/// Tag every image file in a directory.
///
/// Files are visited in name order and filtered by image extension;
/// subdirectories are ignored. A file that cannot be read or decoded yields
/// an error record and the others are still tagged.
pub fn tag_images(dir: impl AsRef<Path>, capabilities: Capabilities) -> Result<Vec<ItemResult<ImageTags>>> {
    let dir = dir.as_ref();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        if path.is_file() && scanner::image_extension(&name) {
            files.push(path);
        }
    }
    files.sort();

    Ok(files
        .into_iter()
        .map(|path| {
            let item = path.display().to_string();
            let tagged = fs::read(&path)
                .map_err(Error::from)
                .and_then(|data| probe(&data, capabilities))
                .map(|info| ImageTags {
                    tags: info.tags(),
                    info,
                    path,
                });
            tagged.map_err(|e| {
                warn!("cannot tag {item}: {e}");
                e.into_item(item)
            })
        })
        .collect())
}
