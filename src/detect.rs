//! Input format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported input formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFormat {
    /// A PDF file with its header version (e.g., "1.7", "2.0")
    Pdf { version: String },
    /// A JSON dump of positioned text fragments
    Fragments,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Pdf { version } => write!(f, "PDF {}", version),
            InputFormat::Fragments => write!(f, "fragments"),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const HEADER_LEN: usize = 64;

/// Detect the input format from a file path.
///
/// # Example
/// ```no_run
/// use cvlayout::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("resume.pdf").unwrap();
/// println!("Input: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let mut header = Vec::with_capacity(HEADER_LEN);
    File::open(path)?
        .take(HEADER_LEN as u64)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the input format from the first bytes of a file.
///
/// # Returns
/// * `Ok(InputFormat::Pdf)` if the data starts with a PDF header
/// * `Ok(InputFormat::Fragments)` if the data starts like a JSON object or array
/// * `Err(Error::UnsupportedVersion)` for a PDF header with a malformed version
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    if data.starts_with(PDF_MAGIC) {
        if data.len() < PDF_MAGIC_LEN + VERSION_LEN {
            return Err(Error::UnknownFormat);
        }

        // Extract version string (e.g., "1.7" from "%PDF-1.7")
        let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
        let version = String::from_utf8_lossy(version_bytes).to_string();
        if !is_valid_version(&version) {
            return Err(Error::UnsupportedVersion(version));
        }
        return Ok(InputFormat::Pdf { version });
    }

    let body = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    match body.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') | Some(b'[') => Ok(InputFormat::Fragments),
        _ => Err(Error::UnknownFormat),
    }
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// Check if bytes represent a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(InputFormat::Pdf { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_valid_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        let format = detect_format_from_bytes(data).unwrap();
        assert_eq!(
            format,
            InputFormat::Pdf {
                version: "1.7".into()
            }
        );
        assert_eq!(format.to_string(), "PDF 1.7");
        assert!(is_pdf_bytes(data));
    }

    #[test]
    fn test_detect_fragments() {
        assert_eq!(
            detect_format_from_bytes(b"  \n[[{\"str\":\"a\"}]]").unwrap(),
            InputFormat::Fragments
        );
        assert_eq!(
            detect_format_from_bytes(b"\xEF\xBB\xBF{\"pages\":[]}").unwrap(),
            InputFormat::Fragments
        );
        assert!(!is_pdf_bytes(b"[]"));
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = detect_format_from_bytes(b"<!DOCTYPE html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));
        assert!(matches!(detect_format_from_bytes(b""), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_too_short() {
        let result = detect_format_from_bytes(b"%PDF-1");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_bad_version() {
        let result = detect_format_from_bytes(b"%PDF-x.y\n");
        assert!(matches!(result, Err(Error::UnsupportedVersion(_))));
    }

    #[test]
    fn test_detect_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"%PDF-2.0\n").unwrap();
        assert_eq!(
            detect_format_from_path(file.path()).unwrap(),
            InputFormat::Pdf {
                version: "2.0".into()
            }
        );
    }
}
