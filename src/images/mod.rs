//! Image assets of documents and archives
//!
//! - `probe`: format and dimension sniffing (`imgconv` feature)
//! - `assets`: collecting media payloads from a document or a plain archive,
//!   including documents nested inside the archive
//!
//! Payload bytes are always returned untouched. Metadata is decoded per image
//! and a failure there never drops the payload.

pub mod assets;
pub mod probe;

pub use assets::{ArchiveImages, AssetSource, ImageAsset, archive_images, document_images};
pub use probe::{ImageInfo, probe};
