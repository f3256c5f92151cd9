//! Classified content blocks.

use serde::{Deserialize, Serialize};

/// Structural tag assigned to a reconstructed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// A resume section heading ("EXPERIENCE", "EDUCATION", ...)
    Header,
    /// A sub-heading: dates, company names, locations
    Subsection,
    /// A list item
    Bullet,
    /// Plain body text
    #[default]
    Text,
}

impl BlockKind {
    /// Short label used by the debug listing.
    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::Header => "HEADER",
            BlockKind::Subsection => "SUBSECTION",
            BlockKind::Bullet => "BULLET",
            BlockKind::Text => "TEXT",
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A classified unit of document structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Structural kind
    pub kind: BlockKind,
    /// Cleaned text (markers stripped for bullets)
    pub content: String,
    /// Page the block starts on (1-indexed)
    #[serde(default)]
    pub page: u32,
    /// Font size of the first line of the block
    #[serde(default, rename = "fontSize")]
    pub font_size: f32,
}

impl ContentBlock {
    /// Create a block without provenance.
    pub fn new(kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            page: 0,
            font_size: 0.0,
        }
    }

    /// Create a plain text block.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(BlockKind::Text, content)
    }

    /// Create a header block.
    pub fn header(content: impl Into<String>) -> Self {
        Self::new(BlockKind::Header, content)
    }

    /// Create a subsection block.
    pub fn subsection(content: impl Into<String>) -> Self {
        Self::new(BlockKind::Subsection, content)
    }

    /// Create a bullet block.
    pub fn bullet(content: impl Into<String>) -> Self {
        Self::new(BlockKind::Bullet, content)
    }

    /// Attach provenance.
    pub fn with_origin(mut self, page: u32, font_size: f32) -> Self {
        self.page = page;
        self.font_size = font_size;
        self
    }

    /// Check if this is a plain text block.
    pub fn is_text(&self) -> bool {
        self.kind == BlockKind::Text
    }
}
