//! Error types for slide extraction, rendering and packaging.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning a presentation into images.
///
/// Recoverable problems (missing fonts, malformed colors, out-of-range
/// batch indices) never show up here; they degrade in place.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file format is not supported or could not be detected.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// Failed to parse the PPTX file structure.
    #[error("PPTX parsing error: {0}")]
    PptxParseError(String),

    /// ZIP archive error (reading PPTX parts).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error (for PPTX).
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// A single-slide request named a slide that does not exist.
    #[error("Invalid slide index {index} (presentation has {count} slides)")]
    InvalidSlideIndex { index: i64, count: usize },

    /// A request field could not be understood (e.g. a malformed index list).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The rendered canvas could not be encoded.
    #[error("Image encoding error: {0}")]
    ImageEncodeError(String),

    /// Writing the output archive failed.
    #[error("Archive error: {0}")]
    ArchiveError(String),
}

/// Coarse classification of an [`Error`], used by callers to pick a
/// client-facing or server-facing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself was wrong (bad slide index, malformed field).
    InvalidInput,
    /// The document or the output could not be processed.
    Processing,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidSlideIndex { .. } | Error::InvalidRequest(_) => ErrorKind::InvalidInput,
            _ => ErrorKind::Processing,
        }
    }

    /// Whether the caller is at fault.
    pub fn is_client_error(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::ZipError(e.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::ImageEncodeError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = Error::InvalidSlideIndex { index: 7, count: 3 };
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.is_client_error());
        assert_eq!(
            err.to_string(),
            "Invalid slide index 7 (presentation has 3 slides)"
        );

        assert!(Error::InvalidRequest("bad json".into()).is_client_error());

        let err = Error::PptxParseError("missing presentation.xml".into());
        assert_eq!(err.kind(), ErrorKind::Processing);
        assert!(!err.is_client_error());
    }
}
