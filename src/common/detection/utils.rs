//! Signature constants for container detection.

// Magic number signatures
pub const OLE2_SIGNATURE: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
pub const ZIP_SIGNATURE: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
/// End-of-central-directory record at offset 0: a ZIP archive with no entries.
pub const ZIP_EMPTY_SIGNATURE: &[u8] = &[0x50, 0x4B, 0x05, 0x06];
