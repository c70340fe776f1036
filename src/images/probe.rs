//! Image format and dimension sniffing.

use crate::common::Capabilities;
use crate::common::error::{Error, Result};
use serde::Serialize;

/// Decoded metadata of an image payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    /// Upper-case format tag (`PNG`, `JPEG`, ...)
    pub format: String,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    /// Tags used when labelling an exported image: lower-case format and `WxH`.
    pub fn tags(&self) -> Vec<String> {
        vec![
            self.format.to_ascii_lowercase(),
            format!("{}x{}", self.width, self.height),
        ]
    }
}

/// Sniff the format and dimensions of an image payload.
///
/// Only the header is decoded. The payload itself is never modified.
pub fn probe(data: &[u8], capabilities: Capabilities) -> Result<ImageInfo> {
    if !capabilities.image_metadata {
        return Err(Error::FeatureDisabled("imgconv".to_string()));
    }
    sniff(data)
}

#[cfg(feature = "imgconv")]
fn sniff(data: &[u8]) -> Result<ImageInfo> {
    use image::ImageReader;
    use std::io::Cursor;

    let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    let format = reader.format().ok_or_else(|| Error::ItemDecodeFailure {
        item: "image".to_string(),
        reason: "unrecognized image format".to_string(),
    })?;
    let (width, height) = reader.into_dimensions().map_err(|e| Error::ItemDecodeFailure {
        item: "image".to_string(),
        reason: e.to_string(),
    })?;

    Ok(ImageInfo {
        format: format_tag(format),
        width,
        height,
    })
}

#[cfg(not(feature = "imgconv"))]
fn sniff(_data: &[u8]) -> Result<ImageInfo> {
    Err(Error::FeatureDisabled("imgconv".to_string()))
}

#[cfg(feature = "imgconv")]
fn format_tag(format: image::ImageFormat) -> String {
    use image::ImageFormat;

    match format {
        ImageFormat::Png => "PNG".to_string(),
        ImageFormat::Jpeg => "JPEG".to_string(),
        ImageFormat::Gif => "GIF".to_string(),
        ImageFormat::Bmp => "BMP".to_string(),
        ImageFormat::Tiff => "TIFF".to_string(),
        ImageFormat::WebP => "WEBP".to_string(),
        ImageFormat::Ico => "ICO".to_string(),
        other => format!("{other:?}").to_ascii_uppercase(),
    }
}
