//! Container format detection.
//!
//! Detection is based on file signatures (magic numbers) only. The file
//! extension is supplied by the caller and is never trusted to decide whether
//! bytes hold an archive.

// Submodule declarations
pub mod types;
pub mod utils;

use std::io::Read;

// Re-exports
pub use types::ContainerFormat;

/// Detect the container format from the leading bytes of a buffer.
#[inline]
pub fn detect_container_format(header: &[u8]) -> ContainerFormat {
    if header.starts_with(utils::ZIP_SIGNATURE) || header.starts_with(utils::ZIP_EMPTY_SIGNATURE) {
        return ContainerFormat::Zip;
    }
    if header.starts_with(utils::OLE2_SIGNATURE) {
        return ContainerFormat::Ole2;
    }
    ContainerFormat::Unknown
}

/// Detect the container format by reading at most 8 bytes from a reader.
pub fn detect_container_format_from_reader<R: Read>(reader: &mut R) -> std::io::Result<ContainerFormat> {
    let mut header = [0u8; 8];
    let mut filled = 0;
    while filled < header.len() {
        match reader.read(&mut header[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(detect_container_format(&header[..filled]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_signatures() {
        assert_eq!(detect_container_format(b"PK\x03\x04rest"), ContainerFormat::Zip);
        assert_eq!(detect_container_format(b"PK\x05\x06"), ContainerFormat::Zip);
        assert_eq!(
            detect_container_format(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]),
            ContainerFormat::Ole2
        );
        assert_eq!(detect_container_format(b"%PDF-1.7"), ContainerFormat::Unknown);
        assert_eq!(detect_container_format(b"PK"), ContainerFormat::Unknown);
    }

    #[test]
    fn test_detect_from_short_reader() {
        let mut reader = std::io::Cursor::new(b"PK\x03".to_vec());
        assert_eq!(
            detect_container_format_from_reader(&mut reader).unwrap(),
            ContainerFormat::Unknown
        );
    }
}
