//! JSON rendering for structured resumes.

use crate::error::{Error, Result};

use super::StructuredResume;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a structured resume to JSON.
pub fn to_json(resume: &StructuredResume, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(resume),
        JsonFormat::Compact => serde_json::to_string(resume),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
