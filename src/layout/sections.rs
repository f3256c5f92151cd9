//! Section stream building: classified lines to merged content blocks.

use regex::Regex;

use crate::model::{BlockKind, ContentBlock, Line};

use super::classify::{is_all_caps, LineClassifier};

/// Leading bullet glyph, dash or list number removed from bullet content.
const BULLET_PREFIX: &str = r"^(?:[•●○]\s*|[-–]\s+|\d+[.)]\s+)";

/// Turns classified page lines into an ordered block stream.
#[derive(Debug, Clone)]
pub struct SectionBuilder {
    marker: Regex,
    header_like_max_len: usize,
    merge_font_tolerance: f32,
}

impl SectionBuilder {
    /// Create a builder using the classifier's thresholds.
    pub fn new(classifier: &LineClassifier) -> Self {
        let options = classifier.options();
        Self {
            marker: Regex::new(BULLET_PREFIX).unwrap(),
            header_like_max_len: options.header_like_max_len,
            merge_font_tolerance: options.merge_font_tolerance,
        }
    }

    /// Blocks for one page, unmerged.
    pub fn page_blocks(&self, page: u32, lines: &[Line], kinds: &[BlockKind]) -> Vec<ContentBlock> {
        lines
            .iter()
            .zip(kinds)
            .map(|(line, &kind)| {
                let content = match kind {
                    BlockKind::Bullet => self.strip_marker(&line.text),
                    _ => line.text.trim().to_string(),
                };
                ContentBlock::new(kind, content).with_origin(page, line.font_size)
            })
            .collect()
    }

    /// Remove a leading bullet glyph, dash or list number.
    pub fn strip_marker(&self, text: &str) -> String {
        self.marker.replace(text.trim(), "").trim().to_string()
    }

    /// Join `Text` blocks that continue the preceding paragraph.
    ///
    /// A text block joins the previous block when that block is also text,
    /// does not end in `.`, `!` or `?`, the candidate is not header-like and
    /// both share a font size. Order is never changed and non-text blocks
    /// are never merged into or from.
    pub fn merge_paragraphs(&self, blocks: Vec<ContentBlock>) -> Vec<ContentBlock> {
        let mut merged: Vec<ContentBlock> = Vec::with_capacity(blocks.len());

        for block in blocks {
            if let Some(prev) = merged.last_mut() {
                if self.continues_paragraph(prev, &block) {
                    let tail = block.content.trim();
                    if !tail.is_empty() {
                        if !prev.content.is_empty() {
                            prev.content.push(' ');
                        }
                        prev.content.push_str(tail);
                    }
                    continue;
                }
            }
            merged.push(block);
        }

        merged
    }

    fn continues_paragraph(&self, prev: &ContentBlock, next: &ContentBlock) -> bool {
        prev.is_text()
            && next.is_text()
            && !ends_sentence(&prev.content)
            && !self.is_header_like(&next.content)
            && (prev.font_size - next.font_size).abs() < self.merge_font_tolerance
    }

    /// Short all-caps text that should stand on its own.
    pub fn is_header_like(&self, text: &str) -> bool {
        let text = text.trim();
        text.chars().count() < self.header_like_max_len && is_all_caps(text)
    }
}

fn ends_sentence(text: &str) -> bool {
    matches!(text.trim_end().chars().last(), Some('.' | '!' | '?'))
}
