//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from the
//! errors of the archive and XML crates to the unified Error type.

use super::types::Error;

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::FileNotFound => {
                Error::EntryNotFound("requested entry".to_string())
            },
            other => Error::NotAContainer(other.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::MalformedDocument(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::MalformedDocument(err.to_string())
    }
}

impl From<quick_xml::encoding::EncodingError> for Error {
    fn from(err: quick_xml::encoding::EncodingError) -> Self {
        Error::MalformedDocument(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ErrorKind;

    #[test]
    fn test_zip_errors_map_to_container_kinds() {
        let err: Error = zip::result::ZipError::FileNotFound.into();
        assert_eq!(err.kind(), ErrorKind::EntryNotFound);

        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: Error = zip::result::ZipError::Io(io).into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
