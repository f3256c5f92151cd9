//! Structuring result with derived data and statistics.

use serde::{Deserialize, Serialize};

use crate::model::{BlockKind, ContactInfo, ContentBlock, Line, Metadata, OutputBlock, SkillSet};

/// Everything produced for one resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredResume {
    /// Source document metadata
    pub metadata: Metadata,

    /// Extracted contact details
    pub contact: ContactInfo,

    /// Skills matched in the skills section
    pub skills: SkillSet,

    /// Classified and merged content blocks
    pub blocks: Vec<ContentBlock>,

    /// Rendered output blocks
    pub output: Vec<OutputBlock>,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl StructuredResume {
    /// Check if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.output.is_empty()
    }

    /// Blocks of one kind.
    pub fn blocks_of(&self, kind: BlockKind) -> impl Iterator<Item = &ContentBlock> {
        self.blocks.iter().filter(move |b| b.kind == kind)
    }
}

/// Statistics collected during structuring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Total number of pages processed
    pub page_count: u32,

    /// Number of reconstructed lines
    pub line_count: u32,

    /// Number of header blocks
    pub header_count: u32,

    /// Number of subsection blocks
    pub subsection_count: u32,

    /// Number of bullet blocks
    pub bullet_count: u32,

    /// Number of text blocks after merging
    pub text_count: u32,

    /// Number of matched skills
    pub skill_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count pages and lines.
    pub fn count_lines(&mut self, pages: &[Vec<Line>]) {
        self.page_count += pages.len() as u32;
        self.line_count += pages.iter().map(|p| p.len() as u32).sum::<u32>();
    }

    /// Count one block by kind and its words.
    pub fn add_block(&mut self, block: &ContentBlock) {
        match block.kind {
            BlockKind::Header => self.header_count += 1,
            BlockKind::Subsection => self.subsection_count += 1,
            BlockKind::Bullet => self.bullet_count += 1,
            BlockKind::Text => self.text_count += 1,
        }
        self.word_count += block.content.split_whitespace().count() as u32;
    }

    /// Count every block in a stream.
    pub fn count_blocks(&mut self, blocks: &[ContentBlock]) {
        for block in blocks {
            self.add_block(block);
        }
    }

    /// Total number of blocks.
    pub fn block_count(&self) -> u32 {
        self.header_count + self.subsection_count + self.bullet_count + self.text_count
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.page_count += other.page_count;
        self.line_count += other.line_count;
        self.header_count += other.header_count;
        self.subsection_count += other.subsection_count;
        self.bullet_count += other.bullet_count;
        self.text_count += other.text_count;
        self.skill_count += other.skill_count;
        self.word_count += other.word_count;
    }
}
