//! Reconstructed visual lines.

use serde::{Deserialize, Serialize};

use super::PositionedFragment;

/// A visual line: fragments merged by vertical proximity, left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Fragment texts joined with single spaces
    pub text: String,
    /// X of the leftmost fragment (indentation signal)
    pub x: f32,
    /// Y of the leftmost fragment
    pub y: f32,
    /// Font size of the leftmost fragment
    #[serde(rename = "fontSize")]
    pub font_size: f32,
    /// Number of fragments merged into this line
    #[serde(default)]
    pub fragment_count: usize,
}

impl Line {
    /// Create a line directly (useful when lines come from elsewhere).
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
            fragment_count: 1,
        }
    }

    /// Build a line from fragments already ordered left to right.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_fragments(fragments: &[PositionedFragment]) -> Option<Self> {
        let first = fragments.first()?;
        let text = fragments
            .iter()
            .map(|f| f.text.trim())
            .collect::<Vec<_>>()
            .join(" ");

        Some(Self {
            text,
            x: first.x,
            y: first.y,
            font_size: first.font_size,
            fragment_count: fragments.len(),
        })
    }

    /// Number of characters in the line text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fragments_takes_first_geometry() {
        let frags = vec![
            PositionedFragment::new("Senior", 72.0, 500.0, 11.0),
            PositionedFragment::new(" Engineer ", 120.0, 501.0, 10.0),
        ];
        let line = Line::from_fragments(&frags).unwrap();
        assert_eq!(line.text, "Senior Engineer");
        assert_eq!(line.x, 72.0);
        assert_eq!(line.y, 500.0);
        assert_eq!(line.font_size, 11.0);
        assert_eq!(line.fragment_count, 2);
    }

    #[test]
    fn test_from_fragments_empty() {
        assert!(Line::from_fragments(&[]).is_none());
    }
}
