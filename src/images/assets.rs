//! Image assets collected from documents and plain archives.

use super::probe::{ImageInfo, probe};
use crate::archive::{ArchivePackage, scanner};
use crate::common::Capabilities;
use crate::common::error::{ItemError, ItemResult, Result};
use log::{debug, warn};
use serde::Serialize;
use std::io::{Read, Seek};

/// Where an image payload was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetSource {
    /// A file entry of the opened container
    Archive { entry: String },
    /// A media entry of a document stored inside the opened container
    EmbeddedDocument { document: String, entry: String },
}

impl AssetSource {
    /// Entry path of the image inside its immediate container.
    pub fn entry(&self) -> &str {
        match self {
            AssetSource::Archive { entry } => entry,
            AssetSource::EmbeddedDocument { entry, .. } => entry,
        }
    }

    /// Full location, with nested containers separated by `!`.
    pub fn location(&self) -> String {
        match self {
            AssetSource::Archive { entry } => entry.clone(),
            AssetSource::EmbeddedDocument { document, entry } => format!("{document}!{entry}"),
        }
    }
}

/// An image payload plus independently decoded metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ImageAsset {
    pub source: AssetSource,
    #[serde(skip)]
    pub data: Vec<u8>,
    /// Metadata, or why it could not be read; the payload is valid either way
    pub metadata: ItemResult<ImageInfo>,
}

impl ImageAsset {
    fn new(source: AssetSource, data: Vec<u8>, capabilities: Capabilities) -> Self {
        let metadata = probe(&data, capabilities).map_err(|e| e.into_item(source.location()));
        Self {
            source,
            data,
            metadata,
        }
    }

    /// Lower-case extension of the entry name including the dot, if any.
    pub fn extension(&self) -> Option<String> {
        let name = self.source.entry().rsplit('/').next().unwrap_or_default();
        let dot = name.rfind('.')?;
        (dot > 0 && dot + 1 < name.len()).then(|| name[dot..].to_ascii_lowercase())
    }
}

/// Images found in a plain archive, with failures of nested documents.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArchiveImages {
    /// Loose image files first, then media of each nested document
    pub images: Vec<ImageAsset>,
    /// One record per nested document that could not be opened
    pub errors: Vec<ItemError>,
}

/// Collect the media images of a document container.
pub fn document_images<R: Read + Seek>(
    package: &ArchivePackage<R>,
    media_prefix: &str,
    capabilities: Capabilities,
) -> Result<Vec<ImageAsset>> {
    let mut images = Vec::new();
    for asset in scanner::scan_iter(package, scanner::media_prefix(media_prefix))? {
        let asset = asset?;
        images.push(ImageAsset::new(
            AssetSource::Archive { entry: asset.path },
            asset.data,
            capabilities,
        ));
    }
    debug!("{}: {} media images", package.label(), images.len());
    Ok(images)
}

/// Collect images from a plain archive.
///
/// Loose image files come first in enumeration order, followed by the media
/// of every `.docx` entry, each opened as a nested container. A nested
/// document that cannot be opened is reported in [`ArchiveImages::errors`]
/// and does not stop the others.
pub fn archive_images<R: Read + Seek>(
    package: &ArchivePackage<R>,
    media_prefix: &str,
    capabilities: Capabilities,
) -> Result<ArchiveImages> {
    let mut result = ArchiveImages::default();

    for asset in scanner::scan_iter(package, scanner::image_extension)? {
        let asset = asset?;
        result.images.push(ImageAsset::new(
            AssetSource::Archive { entry: asset.path },
            asset.data,
            capabilities,
        ));
    }

    for document in scanner::scan_iter(package, scanner::docx_extension)? {
        let document = document?;
        match nested_document_images(document.path.clone(), document.data, media_prefix, capabilities) {
            Ok(mut images) => result.images.append(&mut images),
            Err(e) => {
                warn!("skipping nested document {}: {e}", document.path);
                result.errors.push(e);
            },
        }
    }

    debug!(
        "{}: {} images, {} failed documents",
        package.label(),
        result.images.len(),
        result.errors.len()
    );
    Ok(result)
}

fn nested_document_images(
    document: String,
    data: Vec<u8>,
    media_prefix: &str,
    capabilities: Capabilities,
) -> ItemResult<Vec<ImageAsset>> {
    let collect = || -> Result<Vec<ImageAsset>> {
        let nested = ArchivePackage::open_nested(data, document.clone())?;
        let mut images = Vec::new();
        for asset in scanner::scan_iter(&nested, scanner::media_prefix(media_prefix))? {
            let asset = asset?;
            images.push(ImageAsset::new(
                AssetSource::EmbeddedDocument {
                    document: document.clone(),
                    entry: asset.path,
                },
                asset.data,
                capabilities,
            ));
        }
        Ok(images)
    };
    collect().map_err(|e| e.into_item(document.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ErrorKind;
    use crate::common::options::MEDIA_PREFIX;
    use crate::test_support::{docx_bytes, zip_bytes};

    #[test]
    fn test_document_images() {
        let data = docx_bytes(
            "",
            &[
                ("word/media/image1.png", b"one"),
                ("word/media/image2.emf", b"two"),
            ],
        );
        let package = ArchivePackage::open_nested(data, "doc.docx").unwrap();
        let images = document_images(&package, MEDIA_PREFIX, Capabilities::none()).unwrap();

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].source.entry(), "word/media/image1.png");
        assert_eq!(images[1].data, b"two");
        assert_eq!(images[1].extension().as_deref(), Some(".emf"));
        let err = images[0].metadata.as_ref().unwrap_err();
        assert_eq!(err.kind, ErrorKind::FeatureDisabled);
        assert_eq!(err.item, "word/media/image1.png");
    }

    #[test]
    fn test_archive_images_orders_loose_files_first() {
        let inner = docx_bytes(
            "",
            &[("word/media/a.png", b"A"), ("word/media/b.jpeg", b"B")],
        );
        let data = zip_bytes(&[
            ("reports/q1.docx", &inner),
            ("photo.png", b"P"),
            ("notes.txt", b"skip"),
        ]);
        let package = ArchivePackage::open_nested(data, "bundle.zip").unwrap();
        let result = archive_images(&package, MEDIA_PREFIX, Capabilities::none()).unwrap();

        assert!(result.errors.is_empty());
        let locations: Vec<_> = result.images.iter().map(|i| i.source.location()).collect();
        assert_eq!(
            locations,
            [
                "photo.png",
                "reports/q1.docx!word/media/a.png",
                "reports/q1.docx!word/media/b.jpeg",
            ]
        );
    }

    #[test]
    fn test_broken_nested_document_is_isolated() {
        let good = docx_bytes("", &[("word/media/x.gif", b"G")]);
        let data = zip_bytes(&[("bad.docx", b"not a zip"), ("good.docx", &good)]);
        let package = ArchivePackage::open_nested(data, "bundle.zip").unwrap();
        let result = archive_images(&package, MEDIA_PREFIX, Capabilities::none()).unwrap();

        assert_eq!(result.images.len(), 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].item, "bad.docx");
        assert_eq!(result.errors[0].kind, ErrorKind::NotAContainer);
    }

    #[cfg(feature = "imgconv")]
    #[test]
    fn test_corrupt_image_keeps_its_payload() {
        use crate::test_support::png_bytes;

        let png = png_bytes(4, 3);
        let inner = docx_bytes(
            "",
            &[("word/media/good.png", &png), ("word/media/bad.png", b"not really an image")],
        );
        let data = zip_bytes(&[("report.docx", &inner)]);
        let package = ArchivePackage::open_nested(data, "bundle.zip").unwrap();
        let result = archive_images(&package, MEDIA_PREFIX, Capabilities::detect()).unwrap();

        assert!(result.errors.is_empty());
        assert_eq!(result.images.len(), 2);
        let good = &result.images[0];
        assert_eq!(good.data, png);
        let info = good.metadata.as_ref().unwrap();
        assert_eq!((info.format.as_str(), info.width, info.height), ("PNG", 4, 3));

        let bad = &result.images[1];
        assert_eq!(bad.data, b"not really an image");
        let err = bad.metadata.as_ref().unwrap_err();
        assert_eq!(err.kind, ErrorKind::ItemDecodeFailure);
        assert_eq!(err.item, "report.docx!word/media/bad.png");
    }

    #[test]
    fn test_extension_fallbacks() {
        let asset = |entry: &str| ImageAsset {
            source: AssetSource::Archive { entry: entry.to_string() },
            data: Vec::new(),
            metadata: Err(ItemError::new(entry, ErrorKind::FeatureDisabled, "off")),
        };
        assert_eq!(asset("a/B.JPG").extension().as_deref(), Some(".jpg"));
        assert_eq!(asset("a/noext").extension(), None);
        assert_eq!(asset("a.b/noext").extension(), None);
        assert_eq!(asset("trailing.").extension(), None);
    }
}
