//! Plain text rendering for structured resumes.

use crate::error::Result;
use crate::model::OutputBlock;

use super::RenderOptions;

/// Convert output blocks to plain text.
///
/// Headings are upper-cased, list items keep the configured marker and a
/// skills grid becomes one line per row with cells separated by `" | "`.
pub fn to_text(blocks: &[OutputBlock], options: &RenderOptions) -> Result<String> {
    let mut output = String::new();
    let mut in_list = false;

    for block in blocks {
        let is_item = matches!(block, OutputBlock::BulletItem { .. });
        if in_list && !is_item {
            output.push('\n');
        }
        in_list = is_item;

        match block {
            OutputBlock::Title { text } | OutputBlock::Paragraph { text } | OutputBlock::Subheading { text } => {
                output.push_str(text);
                output.push_str("\n\n");
            }
            OutputBlock::Heading { text } => {
                output.push_str(&text.to_uppercase());
                output.push_str("\n\n");
            }
            OutputBlock::BulletItem { text } => {
                output.push(options.list_marker);
                output.push(' ');
                output.push_str(text);
                output.push('\n');
            }
            OutputBlock::SkillsGrid { .. } => {
                for row in block.rows() {
                    output.push_str(&row.join(" | "));
                    output.push('\n');
                }
                output.push('\n');
            }
        }
    }

    Ok(output.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text() {
        let blocks = vec![
            OutputBlock::Title { text: "Jane Doe".into() },
            OutputBlock::Heading { text: "Experience".into() },
            OutputBlock::BulletItem { text: "Shipped *A*".into() },
            OutputBlock::Paragraph { text: "Second paragraph.".into() },
            OutputBlock::SkillsGrid {
                items: vec!["Rust".into(), "Go".into()],
                columns: 1,
            },
        ];

        let result = to_text(&blocks, &RenderOptions::default()).unwrap();
        assert_eq!(
            result,
            "Jane Doe\n\nEXPERIENCE\n\n- Shipped *A*\n\nSecond paragraph.\n\nRust\nGo"
        );
    }

    #[test]
    fn test_to_text_empty() {
        assert_eq!(to_text(&[], &RenderOptions::default()).unwrap(), "");
    }
}
