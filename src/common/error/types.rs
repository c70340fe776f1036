//! Error types shared by every extraction component.
use serde::Serialize;
use thiserror::Error;

/// Main error type for longan operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not a readable compressed archive
    #[error("Not an archive container: {0}")]
    NotAContainer(String),

    /// The container opened but its structural markup could not be parsed
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Requested archive entry is absent
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// A single embedded item failed to decode
    #[error("Failed to decode {item}: {reason}")]
    ItemDecodeFailure { item: String, reason: String },

    /// Caller-supplied path or argument was rejected
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Feature disabled at compile time
    #[error("Feature '{0}' is disabled. Enable it with --features {0}")]
    FeatureDisabled(String),
}

/// Result type for longan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Discriminant of [`Error`], carried by serialized item records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Io,
    NotAContainer,
    MalformedDocument,
    EntryNotFound,
    ItemDecodeFailure,
    InvalidInput,
    FeatureDisabled,
}

impl Error {
    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::NotAContainer(_) => ErrorKind::NotAContainer,
            Error::MalformedDocument(_) => ErrorKind::MalformedDocument,
            Error::EntryNotFound(_) => ErrorKind::EntryNotFound,
            Error::ItemDecodeFailure { .. } => ErrorKind::ItemDecodeFailure,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::FeatureDisabled(_) => ErrorKind::FeatureDisabled,
        }
    }

    /// Scope this error to one item of a batch.
    pub fn into_item(self, item: impl Into<String>) -> ItemError {
        ItemError {
            item: item.into(),
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// A failure scoped to one item (an embedded workbook, an image, an embedded
/// document) that did not abort its siblings.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{item}: {message}")]
pub struct ItemError {
    /// Archive path or file name of the failing item
    pub item: String,
    /// What went wrong
    pub kind: ErrorKind,
    /// Human-readable cause
    pub message: String,
}

impl ItemError {
    /// Build an item error directly from its parts.
    pub fn new(item: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Per-item outcome inside a batch result.
pub type ItemResult<T> = std::result::Result<T, ItemError>;
