//! Layout analysis: from positioned fragments to classified content blocks.
//!
//! The analysis runs in three stages:
//!
//! 1. [`group_fragments_into_lines`] rebuilds visual lines from fragment
//!    coordinates.
//! 2. [`LineClassifier`] tags each line as header, subsection, bullet or text
//!    using only its own page as context.
//! 3. [`SectionBuilder`] emits blocks in document order and merges
//!    paragraph continuations.
//!
//! Every stage is total: any input, including an empty one, produces a
//! (possibly empty) output.

mod classify;
mod lines;
mod options;
mod sections;

pub use classify::LineClassifier;
pub use lines::group_fragments_into_lines;
pub use options::LayoutOptions;
pub use sections::SectionBuilder;

use rayon::prelude::*;

use crate::model::{BlockKind, ContentBlock, Document, Line, PositionedFragment};

/// Layout analyzer for turning fragments into a block stream.
#[derive(Debug, Clone)]
pub struct LayoutAnalyzer {
    classifier: LineClassifier,
    sections: SectionBuilder,
}

impl LayoutAnalyzer {
    /// Create a new layout analyzer.
    pub fn new(options: LayoutOptions) -> Self {
        let classifier = LineClassifier::new(options);
        let sections = SectionBuilder::new(&classifier);
        Self {
            classifier,
            sections,
        }
    }

    /// Options in effect.
    pub fn options(&self) -> &LayoutOptions {
        self.classifier.options()
    }

    /// The line classifier.
    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// Group one page's fragments into lines.
    pub fn reconstruct_lines(&self, fragments: Vec<PositionedFragment>) -> Vec<Line> {
        group_fragments_into_lines(fragments, self.options().y_tolerance)
    }

    /// Classify the line at `index` within its page.
    pub fn classify(&self, index: usize, lines: &[Line]) -> BlockKind {
        self.classifier.classify(index, lines)
    }

    /// Classify all lines of a page.
    pub fn classify_lines(&self, lines: &[Line]) -> Vec<BlockKind> {
        self.classifier.classify_lines(lines)
    }

    /// Build the merged block stream from per-page lines (pages numbered from 1).
    pub fn build_blocks(&self, pages: &[Vec<Line>]) -> Vec<ContentBlock> {
        let numbered: Vec<(u32, &[Line])> = pages
            .iter()
            .enumerate()
            .map(|(i, lines)| (i as u32 + 1, lines.as_slice()))
            .collect();
        self.build_page_blocks(&numbered)
    }

    /// Run the whole analysis on a document.
    pub fn analyze(&self, doc: &Document) -> Vec<ContentBlock> {
        let pages: Vec<(u32, Vec<Line>)> = self
            .map_pages(&doc.pages, |page| {
                (page.number, self.reconstruct_lines(page.fragments.clone()))
            });
        let numbered: Vec<(u32, &[Line])> = pages
            .iter()
            .map(|(number, lines)| (*number, lines.as_slice()))
            .collect();
        self.build_page_blocks(&numbered)
    }

    /// Reconstructed lines for every page of a document.
    pub fn document_lines(&self, doc: &Document) -> Vec<Vec<Line>> {
        self.map_pages(&doc.pages, |page| {
            self.reconstruct_lines(page.fragments.clone())
        })
    }

    /// Build the merged block stream from lines tagged with their page number.
    pub fn build_page_blocks(&self, pages: &[(u32, &[Line])]) -> Vec<ContentBlock> {
        let per_page: Vec<Vec<ContentBlock>> = self.map_pages(pages, |(number, lines)| {
            let kinds = self.classifier.classify_lines(lines);
            log::debug!("Page {}: classified {} lines", number, lines.len());
            self.sections.page_blocks(*number, lines, &kinds)
        });

        let blocks: Vec<ContentBlock> = per_page.into_iter().flatten().collect();
        let total = blocks.len();
        let merged = self.sections.merge_paragraphs(blocks);
        log::debug!("Merged {} blocks into {}", total, merged.len());
        merged
    }

    fn map_pages<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if self.options().parallel && items.len() > 1 {
            items.par_iter().map(f).collect()
        } else {
            items.iter().map(f).collect()
        }
    }
}

impl Default for LayoutAnalyzer {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

/// Reconstruct lines with default options.
pub fn reconstruct_lines(fragments: Vec<PositionedFragment>) -> Vec<Line> {
    LayoutAnalyzer::default().reconstruct_lines(fragments)
}

/// Classify one line in its page context with default options.
pub fn classify(index: usize, lines: &[Line]) -> BlockKind {
    LayoutAnalyzer::default().classify(index, lines)
}

/// Build blocks from per-page lines with default options.
pub fn build_blocks(pages: &[Vec<Line>]) -> Vec<ContentBlock> {
    LayoutAnalyzer::default().build_blocks(pages)
}
