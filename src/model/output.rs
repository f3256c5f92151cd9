//! Format-agnostic output blocks handed to document writers.

use serde::{Deserialize, Serialize};

/// Default number of skills per grid row.
pub const DEFAULT_GRID_COLUMNS: usize = 3;

/// A rendered element of the structured resume.
///
/// Serializes as `{"kind": "...", "text": ...}` or
/// `{"kind": "skillsGrid", "items": [...], "columns": 3}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OutputBlock {
    /// The candidate's name
    Title { text: String },
    /// A section heading
    Heading { text: String },
    /// A sub-heading (role, dates, company)
    Subheading { text: String },
    /// Body text
    Paragraph { text: String },
    /// A list item without its marker
    BulletItem { text: String },
    /// Matched skills laid out in rows of `columns`
    SkillsGrid {
        items: Vec<String>,
        #[serde(default = "default_columns")]
        columns: usize,
    },
}

fn default_columns() -> usize {
    DEFAULT_GRID_COLUMNS
}

impl OutputBlock {
    /// Text of the block, if it carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            OutputBlock::Title { text }
            | OutputBlock::Heading { text }
            | OutputBlock::Subheading { text }
            | OutputBlock::Paragraph { text }
            | OutputBlock::BulletItem { text } => Some(text),
            OutputBlock::SkillsGrid { .. } => None,
        }
    }

    /// Grid items, if this is a skills grid.
    pub fn items(&self) -> Option<&[String]> {
        match self {
            OutputBlock::SkillsGrid { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Grid rows for display; empty for non-grid blocks.
    pub fn rows(&self) -> Vec<&[String]> {
        match self {
            OutputBlock::SkillsGrid { items, columns } => items.chunks((*columns).max(1)).collect(),
            _ => Vec::new(),
        }
    }

    /// Serialized kind name.
    pub fn kind_name(&self) -> &'static str {
        match self {
            OutputBlock::Title { .. } => "title",
            OutputBlock::Heading { .. } => "heading",
            OutputBlock::Subheading { .. } => "subheading",
            OutputBlock::Paragraph { .. } => "paragraph",
            OutputBlock::BulletItem { .. } => "bulletItem",
            OutputBlock::SkillsGrid { .. } => "skillsGrid",
        }
    }
}
