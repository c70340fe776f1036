//! Container format enumeration.

/// Physical container formats recognized by signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// ZIP archive (OOXML documents, workbooks, plain archives)
    Zip,
    /// OLE2 compound file (legacy .doc, .xls); not an archive container
    Ole2,
    /// Anything else
    Unknown,
}

impl ContainerFormat {
    /// Human-readable description used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            ContainerFormat::Zip => "ZIP archive",
            ContainerFormat::Ole2 => "legacy OLE2 compound file",
            ContainerFormat::Unknown => "unrecognized data",
        }
    }
}
