//! Error types for cvlayout library.
//!
//! The structuring pipeline itself is total and never fails. Errors only
//! arise at the boundaries: reading input, decoding PDF content streams or
//! fragment dumps, and serializing output.

use std::io;
use thiserror::Error;

/// Result type alias for cvlayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or emitting documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is neither a PDF nor a fragment dump.
    #[error("Unknown input format: expected a PDF or a JSON fragment dump")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// PDF parsing was requested but the crate was built without it.
    #[error("PDF support is disabled (enable the `pdf` feature)")]
    PdfUnsupported,

    /// A JSON fragment dump could not be decoded.
    #[error("Fragment decoding error: {0}")]
    FragmentDecode(#[from] serde_json::Error),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "pdf")]
impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (document has 5 pages)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u32>>("[1,").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::FragmentDecode(_)));
        assert!(err.to_string().starts_with("Fragment decoding error"));
    }
}
