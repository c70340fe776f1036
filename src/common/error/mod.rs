//! Unified error types for longan.
//!
//! Container-level and document-level failures are surfaced as [`Error`] and
//! abort the call. Failures scoped to a single embedded item are captured as
//! [`ItemError`] records next to the items that decoded successfully.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, ErrorKind, ItemError, ItemResult, Result};
