//! Content blocks to format-agnostic output blocks.

use crate::extract::{extract_skills, ContactExtractor};
use crate::model::{BlockKind, ContactInfo, ContentBlock, OutputBlock, SkillSet};

use super::{CleanupPipeline, RenderOptions};

/// Render blocks with default options.
pub fn render(blocks: &[ContentBlock]) -> Vec<OutputBlock> {
    DocumentRenderer::default().render(blocks)
}

/// Turns a classified block stream into the structured resume layout.
///
/// Output always starts with the synthesized title and contact line (when
/// found), followed by the body in block order. A header whose text contains
/// the skills keyword switches the renderer into skills mode until the next
/// header: the section's text and bullets are replaced by one skills grid.
/// A skills section with no vocabulary match is rendered as ordinary text
/// rather than as an empty grid.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    options: RenderOptions,
    cleaner: CleanupPipeline,
    contacts: ContactExtractor,
}

impl DocumentRenderer {
    /// Create a new renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            cleaner: CleanupPipeline::new(options.cleanup.clone()),
            contacts: ContactExtractor::with_name_window(options.name_window),
            options,
        }
    }

    /// Options in effect.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render blocks, extracting contact info from them.
    pub fn render(&self, blocks: &[ContentBlock]) -> Vec<OutputBlock> {
        let contact = self.contacts.extract(blocks);
        self.render_with_contact(blocks, &contact)
    }

    /// Render blocks using already extracted contact info.
    pub fn render_with_contact(&self, blocks: &[ContentBlock], contact: &ContactInfo) -> Vec<OutputBlock> {
        let mut output = Vec::with_capacity(blocks.len() + 2);

        let title = contact.name.as_deref().map(|n| self.clean(n)).unwrap_or_default();
        if !title.is_empty() {
            output.push(OutputBlock::Title { text: title });
        }
        let contact_line = contact
            .contact_line(&self.options.contact_separator)
            .map(|line| self.clean(&line))
            .unwrap_or_default();
        if !contact_line.is_empty() {
            output.push(OutputBlock::Paragraph { text: contact_line });
        }

        let name_index = if self.options.dedupe_contact {
            self.contacts.find_name(blocks)
        } else {
            None
        };

        let mut i = 0;
        while i < blocks.len() {
            let block = &blocks[i];

            if self.options.dedupe_contact
                && (name_index == Some(i) || self.repeats_contact(block, contact))
            {
                log::debug!("Dropping block {} already shown in the header", i);
                i += 1;
                continue;
            }

            let text = self.block_text(block);
            if text.is_empty() {
                i += 1;
                continue;
            }

            match block.kind {
                BlockKind::Header => {
                    let skills_mode = self.is_skills_header(&text);
                    output.push(OutputBlock::Heading { text });
                    if skills_mode {
                        let end = section_end(blocks, i + 1);
                        let skills = self.section_skills(&blocks[i + 1..end]);
                        // No matches: emit the section as plain blocks, never an empty grid
                        if !skills.is_empty() {
                            log::debug!("Skills section at block {}: {} matches", i, skills.len());
                            output.push(OutputBlock::SkillsGrid {
                                items: skills.matches,
                                columns: self.options.grid_columns.max(1),
                            });
                            self.push_subheadings(&mut output, &blocks[i + 1..end]);
                            i = end;
                            continue;
                        }
                    }
                }
                BlockKind::Subsection => output.push(OutputBlock::Subheading { text }),
                BlockKind::Bullet => output.push(OutputBlock::BulletItem { text }),
                BlockKind::Text => output.push(OutputBlock::Paragraph { text }),
            }
            i += 1;
        }

        output
    }

    /// Skills from the first skills section that matches any, or an empty set.
    pub fn skills(&self, blocks: &[ContentBlock]) -> SkillSet {
        if !self.options.skills_grid {
            return SkillSet::default();
        }
        blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.kind == BlockKind::Header && self.is_skills_header(&self.clean(&b.content)))
            .map(|(i, _)| self.section_skills(&blocks[i + 1..section_end(blocks, i + 1)]))
            .find(|skills| !skills.is_empty())
            .unwrap_or_default()
    }

    /// Check whether cleaned header text starts skills mode.
    pub fn is_skills_header(&self, text: &str) -> bool {
        let keyword = self.options.skills_keyword.trim();
        self.options.skills_grid
            && !keyword.is_empty()
            && text.to_lowercase().contains(&keyword.to_lowercase())
    }

    fn section_skills(&self, section: &[ContentBlock]) -> SkillSet {
        let scanned: Vec<String> = section
            .iter()
            .filter(|b| matches!(b.kind, BlockKind::Text | BlockKind::Bullet))
            .map(|b| self.block_text(b))
            .collect();
        extract_skills(&scanned.join("\n"), &self.options.skill_vocabulary)
    }

    fn push_subheadings(&self, output: &mut Vec<OutputBlock>, section: &[ContentBlock]) {
        for block in section.iter().filter(|b| b.kind == BlockKind::Subsection) {
            let text = self.block_text(block);
            if !text.is_empty() {
                output.push(OutputBlock::Subheading { text });
            }
        }
    }

    /// Bullet content arrives with its marker already stripped.
    fn block_text(&self, block: &ContentBlock) -> String {
        self.clean(&block.content)
    }

    fn repeats_contact(&self, block: &ContentBlock, contact: &ContactInfo) -> bool {
        let details = contact.details();
        if block.kind != BlockKind::Text || details.is_empty() {
            return false;
        }
        let mut rest = self.clean(&block.content);
        if !details.iter().any(|d| rest.contains(d)) {
            return false;
        }
        for detail in details {
            rest = rest.replace(detail, "");
        }
        !rest.chars().any(char::is_alphanumeric)
    }

    fn clean(&self, text: &str) -> String {
        self.cleaner.process(text)
    }
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

/// Index of the next header at or after `start`, or the stream length.
fn section_end(blocks: &[ContentBlock], start: usize) -> usize {
    blocks[start..]
        .iter()
        .position(|b| b.kind == BlockKind::Header)
        .map_or(blocks.len(), |offset| start + offset)
}
