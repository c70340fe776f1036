//! Optional decoder availability.
//!
//! Capabilities are resolved once (normally at process start) and handed to
//! the components that need them, rather than queried at arbitrary depth.

use serde::Serialize;

/// Which optional decoders are available to an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Embedded workbooks can be decoded (`xlsx` feature)
    pub workbooks: bool,
    /// Image format and dimensions can be sniffed (`imgconv` feature)
    pub image_metadata: bool,
}

impl Capabilities {
    /// Resolve the capabilities compiled into this build.
    pub const fn detect() -> Self {
        Self {
            workbooks: cfg!(feature = "xlsx"),
            image_metadata: cfg!(feature = "imgconv"),
        }
    }

    /// A descriptor with every optional decoder switched off.
    pub const fn none() -> Self {
        Self {
            workbooks: false,
            image_metadata: false,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}
