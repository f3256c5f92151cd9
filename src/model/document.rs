//! Document-level types.

use super::PositionedFragment;
use serde::{Deserialize, Serialize};

/// A source document: pages of positioned fragments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Where the fragments came from
    #[serde(default)]
    pub metadata: Metadata,

    /// Pages in document order
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from per-page fragment lists, numbering pages from 1.
    pub fn from_fragments(pages: Vec<Vec<PositionedFragment>>) -> Self {
        let pages: Vec<Page> = pages
            .into_iter()
            .enumerate()
            .map(|(i, fragments)| Page::with_fragments(i as u32 + 1, fragments))
            .collect();
        let mut doc = Self {
            metadata: Metadata::default(),
            pages,
        };
        doc.metadata.page_count = doc.page_count();
        doc
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.number == page_num)
    }

    /// Add a page to the document. `metadata.page_count` keeps the source total.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Total number of fragments across all pages.
    pub fn fragment_count(&self) -> usize {
        self.pages.iter().map(|p| p.fragments.len()).sum()
    }

    /// Check if the document has no visible text at all.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|p| p.is_empty())
    }

    /// Raw fragment text, one page per paragraph, in source order.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Source format description (e.g. "PDF 1.7", "fragments")
    pub source_format: Option<String>,

    /// Number of pages in the source
    pub page_count: u32,
}

/// A single page of fragments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    #[serde(default)]
    pub number: u32,

    /// Fragments in the order the text layer reported them
    #[serde(default)]
    pub fragments: Vec<PositionedFragment>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            fragments: Vec::new(),
        }
    }

    /// Create a page from fragments.
    pub fn with_fragments(number: u32, fragments: Vec<PositionedFragment>) -> Self {
        Self { number, fragments }
    }

    /// Add a fragment to the page.
    pub fn push(&mut self, fragment: PositionedFragment) {
        self.fragments.push(fragment);
    }

    /// Check if the page has no visible text.
    pub fn is_empty(&self) -> bool {
        self.fragments.iter().all(|f| f.is_blank())
    }

    /// Fragment texts joined with spaces.
    pub fn plain_text(&self) -> String {
        self.fragments
            .iter()
            .filter(|f| !f.is_blank())
            .map(|f| f.text.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
