//! Markdown rendering for structured resumes.

use crate::error::Result;
use crate::model::OutputBlock;

use super::visitor::{DefaultVisitor, OutputVisitor, VisitorAction};
use super::RenderOptions;

/// Convert output blocks to Markdown.
pub fn to_markdown(blocks: &[OutputBlock], options: &RenderOptions) -> Result<String> {
    MarkdownRenderer::new(options.clone()).render(blocks)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    visitor: Box<dyn OutputVisitor>,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            visitor: Box::new(DefaultVisitor),
        }
    }

    /// Consult `visitor` before rendering each block.
    pub fn with_visitor<V: OutputVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitor = Box::new(visitor);
        self
    }

    /// Render output blocks to Markdown.
    pub fn render(mut self, blocks: &[OutputBlock]) -> Result<String> {
        let mut output = String::new();
        let mut in_list = false;

        for block in blocks {
            let action = self.visit(block);
            if action.should_skip() {
                continue;
            }

            let is_item = matches!(block, OutputBlock::BulletItem { .. });
            if in_list && !is_item {
                output.push('\n');
            }
            in_list = is_item;

            match action.replacement() {
                Some(replacement) => output.push_str(replacement),
                None => self.render_block(&mut output, block),
            }
        }

        Ok(output.trim().to_string())
    }

    fn visit(&mut self, block: &OutputBlock) -> VisitorAction {
        match block {
            OutputBlock::Title { text } => self.visitor.visit_title(text),
            OutputBlock::Heading { text } => self.visitor.visit_heading(text),
            OutputBlock::Subheading { text } => self.visitor.visit_subheading(text),
            OutputBlock::Paragraph { text } => self.visitor.visit_paragraph(text),
            OutputBlock::BulletItem { text } => self.visitor.visit_bullet_item(text),
            OutputBlock::SkillsGrid { items, columns } => {
                self.visitor.visit_skills_grid(items, *columns)
            }
        }
    }

    fn render_block(&self, output: &mut String, block: &OutputBlock) {
        match block {
            OutputBlock::Title { text } => self.render_heading(output, 1, text),
            OutputBlock::Heading { text } => self.render_heading(output, 2, text),
            OutputBlock::Subheading { text } => self.render_heading(output, 3, text),
            OutputBlock::Paragraph { text } => {
                output.push_str(&self.escape(text));
                output.push_str("\n\n");
            }
            OutputBlock::BulletItem { text } => {
                output.push(self.options.list_marker);
                output.push(' ');
                output.push_str(&self.escape(text));
                output.push('\n');
            }
            OutputBlock::SkillsGrid { .. } => self.render_grid(output, block),
        }
    }

    fn render_heading(&self, output: &mut String, level: usize, text: &str) {
        output.push_str(&"#".repeat(level));
        output.push(' ');
        output.push_str(&self.escape(text));
        output.push_str("\n\n");
    }

    /// Skills grid as a header-less Markdown table, `columns` cells per row.
    fn render_grid(&self, output: &mut String, grid: &OutputBlock) {
        let rows = grid.rows();
        let Some(width) = rows.iter().map(|r| r.len()).max() else {
            return;
        };

        // Markdown tables need a header row; keep it blank
        output.push('|');
        output.push_str(&"   |".repeat(width));
        output.push('\n');
        output.push('|');
        output.push_str(&"---|".repeat(width));
        output.push('\n');

        for row in rows {
            output.push('|');
            for i in 0..width {
                let cell = row.get(i).map(|s| escape_markdown(s)).unwrap_or_default();
                output.push_str(&format!(" {} |", cell));
            }
            output.push('\n');
        }
        output.push('\n');
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
