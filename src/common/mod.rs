//! Common types and utilities shared by every extraction component.

// Submodule declarations
pub mod capabilities;
pub mod detection;
pub mod error;
pub mod options;
pub(crate) mod xml;

// Re-exports for convenience
pub use capabilities::Capabilities;
pub use detection::{ContainerFormat, detect_container_format};
pub use error::{Error, ErrorKind, ItemError, ItemResult, Result};
pub use options::ExtractOptions;
