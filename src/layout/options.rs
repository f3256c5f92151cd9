//! Layout analysis options.

use crate::vocabulary::DEFAULT_HEADER_KEYWORDS;

/// Thresholds and vocabulary for line reconstruction and classification.
///
/// Distances are in PDF coordinate units, lengths in characters.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Fragments closer than this vertically share a line
    pub y_tolerance: f32,

    /// Section keywords; a line containing one is a header
    pub header_keywords: Vec<String>,

    /// All-caps lines larger than this font size are headers
    pub header_font_size: f32,

    /// All-caps large-font headers must be longer than this
    pub header_min_len: usize,

    /// All-caps lines shorter than this are headers when followed by a body
    pub short_header_max_len: usize,

    /// A following line indented beyond this marks the line above as a header
    pub header_body_indent: f32,

    /// Lines indented beyond this continue a preceding bullet
    pub bullet_continuation_indent: f32,

    /// Length bounds (inclusive) for single-token all-caps subsections
    pub subsection_token_len: (usize, usize),

    /// Short all-caps text below this length never joins a paragraph
    pub header_like_max_len: usize,

    /// Text blocks only merge when their font sizes differ by less than this
    pub merge_font_tolerance: f32,

    /// Classify pages in parallel
    pub parallel: bool,
}

impl LayoutOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the header keyword list.
    pub fn with_header_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the vertical line-grouping tolerance.
    pub fn with_y_tolerance(mut self, tolerance: f32) -> Self {
        self.y_tolerance = tolerance;
        self
    }

    /// Set the font size above which all-caps lines are headers.
    pub fn with_header_font_size(mut self, size: f32) -> Self {
        self.header_font_size = size;
        self
    }

    /// Set the paragraph merge font tolerance.
    pub fn with_merge_font_tolerance(mut self, tolerance: f32) -> Self {
        self.merge_font_tolerance = tolerance;
        self
    }

    /// Enable or disable parallel page classification.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            y_tolerance: 5.0,
            header_keywords: DEFAULT_HEADER_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            header_font_size: 12.0,
            header_min_len: 3,
            short_header_max_len: 50,
            header_body_indent: 100.0,
            bullet_continuation_indent: 50.0,
            subsection_token_len: (4, 59),
            header_like_max_len: 20,
            merge_font_tolerance: 1.0,
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_options_builder() {
        let options = LayoutOptions::new()
            .with_header_keywords(["FORMATION"])
            .with_y_tolerance(3.0)
            .sequential();

        assert_eq!(options.header_keywords, vec!["FORMATION".to_string()]);
        assert_eq!(options.y_tolerance, 3.0);
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_options() {
        let options = LayoutOptions::default();
        assert_eq!(options.y_tolerance, 5.0);
        assert_eq!(options.header_font_size, 12.0);
        assert_eq!(options.subsection_token_len, (4, 59));
        assert!(options.parallel);
    }
}
