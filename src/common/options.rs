//! Extraction options.

use serde::{Deserialize, Serialize};

/// Default number of characters kept in a composite preview.
pub const DEFAULT_MAX_CHARS: usize = 50_000;
/// Default number of rows rendered per sheet in a composite preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;
/// Archive prefix under which documents store their media.
pub const MEDIA_PREFIX: &str = "word/media/";
/// Archive prefix under which documents store embedded binaries.
pub const EMBEDDINGS_PREFIX: &str = "word/embeddings/";

/// Knobs for a single extraction call.
///
/// Every field has a default, so a partial configuration (for example a
/// JSON or TOML fragment) deserializes into a complete one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Maximum characters of the composite preview
    pub max_chars: usize,
    /// Rows rendered per sheet before the "more rows" marker
    pub preview_rows: usize,
    /// Decode workbooks embedded in the document
    pub include_workbooks: bool,
    /// Media storage prefix inside the document archive
    pub media_prefix: String,
    /// Embedded object storage prefix inside the document archive
    pub embeddings_prefix: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            include_workbooks: true,
            media_prefix: MEDIA_PREFIX.to_string(),
            embeddings_prefix: EMBEDDINGS_PREFIX.to_string(),
        }
    }
}

impl ExtractOptions {
    /// Set the preview character budget.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Set the per-sheet preview row count.
    pub fn with_preview_rows(mut self, preview_rows: usize) -> Self {
        self.preview_rows = preview_rows;
        self
    }

    /// Enable or disable embedded workbook decoding.
    pub fn with_workbooks(mut self, include_workbooks: bool) -> Self {
        self.include_workbooks = include_workbooks;
        self
    }
}
