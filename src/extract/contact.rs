//! Contact information extraction.

use regex::Regex;

use crate::model::{BlockKind, ContactInfo, ContentBlock};

/// Number of leading blocks searched for the candidate's name.
pub const DEFAULT_NAME_WINDOW: usize = 5;

/// Finds name, email, phone and location in a block stream.
///
/// Each field is first-match-wins in document order, independently of the
/// others. The name is only taken from the first `name_window` blocks.
#[derive(Debug, Clone)]
pub struct ContactExtractor {
    name_window: usize,
    email: Regex,
    phones: Vec<Regex>,
    location: Regex,
    digit_run: Regex,
}

impl ContactExtractor {
    /// Create an extractor with the default name window.
    pub fn new() -> Self {
        Self::with_name_window(DEFAULT_NAME_WINDOW)
    }

    /// Create an extractor searching the first `window` blocks for a name.
    pub fn with_name_window(window: usize) -> Self {
        let phones = [
            r"\b\d{10}\b",
            r"\d{3}[-.]?\d{3}[-.]?\d{4}",
            r"\(\d{3}\) \d{3}[-.]?\d{4}",
            r"\+\d{1,3}[-.]?\d{3}[-.]?\d{3}[-.]?\d{4}",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();

        Self {
            name_window: window,
            email: Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap(),
            phones,
            location: Regex::new(
                r"\b[A-Z][A-Za-z]+(?:[ \t][A-Z][A-Za-z]+)?,[ \t]*(?:[A-Z]{2}\b|[A-Z][a-z]+)",
            )
            .unwrap(),
            digit_run: Regex::new(r"\d{3,}").unwrap(),
        }
    }

    /// Extract every contact field.
    pub fn extract(&self, blocks: &[ContentBlock]) -> ContactInfo {
        ContactInfo {
            name: self.find_name(blocks).map(|i| blocks[i].content.trim().to_string()),
            email: first_match(blocks, |text| {
                self.email.find(text).map(|m| m.as_str().to_string())
            }),
            phone: first_match(blocks, |text| self.find_phone(text)),
            location: first_match(blocks, |text| {
                self.location.find(text).map(|m| m.as_str().to_string())
            }),
        }
    }

    /// Index of the block the name was taken from.
    pub fn find_name(&self, blocks: &[ContentBlock]) -> Option<usize> {
        blocks
            .iter()
            .take(self.name_window)
            .position(|b| b.kind == BlockKind::Text && self.is_name(&b.content))
    }

    /// Check whether text looks like a person's name.
    pub fn is_name(&self, text: &str) -> bool {
        let text = text.trim();
        let len = text.chars().count();
        let words = text.split_whitespace().count();

        !text.contains('@')
            && !self.digit_run.is_match(text)
            && (2..=4).contains(&words)
            && len > 5
            && len < 60
            && to_title_case(text) == text
    }

    fn find_phone(&self, text: &str) -> Option<String> {
        self.phones
            .iter()
            .find_map(|re| re.find(text).map(|m| m.as_str().to_string()))
    }
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract contact info with default settings.
pub fn extract_contact(blocks: &[ContentBlock]) -> ContactInfo {
    ContactExtractor::new().extract(blocks)
}

fn first_match<F>(blocks: &[ContentBlock], find: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    blocks.iter().find_map(|b| find(&b.content))
}

/// Upper-case the first letter of every word and lower-case the rest, keeping spacing.
fn to_title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            out.push(c);
            word_start = true;
        } else if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> ContentBlock {
        ContentBlock::text(s)
    }

    #[test]
    fn test_extract_header_lines() {
        let blocks = vec![
            text("John Smith"),
            text("john@x.com | 555-123-4567 | Austin, TX"),
        ];
        let info = extract_contact(&blocks);
        assert_eq!(info.name.as_deref(), Some("John Smith"));
        assert_eq!(info.email.as_deref(), Some("john@x.com"));
        assert_eq!(info.phone.as_deref(), Some("555-123-4567"));
        assert_eq!(info.location.as_deref(), Some("Austin, TX"));
    }

    #[test]
    fn test_empty_blocks() {
        assert!(extract_contact(&[]).is_empty());
    }

    #[test]
    fn test_name_rules() {
        let ex = ContactExtractor::new();
        assert!(ex.is_name("Mary Ann Lee"));
        assert!(!ex.is_name("Madonna"));
        assert!(!ex.is_name("JOHN SMITH"));
        assert!(!ex.is_name("john smith"));
        assert!(!ex.is_name("Jo Li"));
        assert!(!ex.is_name("Agent 007 Bond"));
        assert!(!ex.is_name("Mail Me@Home"));
        assert!(!ex.is_name("One Two Three Four Five"));
    }

    #[test]
    fn test_name_with_irregular_spacing() {
        let info = extract_contact(&[text("John  Smith")]);
        assert_eq!(info.name.as_deref(), Some("John  Smith"));
    }

    #[test]
    fn test_name_must_be_text_block() {
        let blocks = vec![ContentBlock::header("Jane Doe"), text("Jane Doe")];
        assert_eq!(ContactExtractor::new().find_name(&blocks), Some(1));
    }

    #[test]
    fn test_name_window_limit() {
        let mut blocks: Vec<ContentBlock> = (0..5).map(|_| text("not a name line here at all")).collect();
        blocks.push(text("Jane Doe"));
        assert!(extract_contact(&blocks).name.is_none());

        let wide = ContactExtractor::with_name_window(6);
        assert_eq!(wide.extract(&blocks).name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_phone_pattern_order() {
        let ex = ContactExtractor::new();
        assert_eq!(ex.find_phone("call 5551234567").as_deref(), Some("5551234567"));
        assert_eq!(ex.find_phone("555.123.4567").as_deref(), Some("555.123.4567"));
        assert_eq!(ex.find_phone("(555) 123-4567").as_deref(), Some("(555) 123-4567"));
        // The dashed pattern is tried before the international one
        assert_eq!(ex.find_phone("+1-555-123-4567").as_deref(), Some("555-123-4567"));
        assert_eq!(ex.find_phone("+44 no"), None);
    }

    #[test]
    fn test_fields_are_independent() {
        let blocks = vec![
            text("Reach me at jane@doe.dev"),
            text("Lives in Lisbon, Portugal"),
            text("other@mail.com (555) 000-1111"),
        ];
        let info = extract_contact(&blocks);
        assert_eq!(info.email.as_deref(), Some("jane@doe.dev"));
        assert_eq!(info.location.as_deref(), Some("Lisbon, Portugal"));
        assert_eq!(info.phone.as_deref(), Some("(555) 000-1111"));
        assert!(info.name.is_none());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(to_title_case("jOHN   smith"), "John   Smith");
        assert_eq!(to_title_case("ana\tmaria"), "Ana\tMaria");
        assert_eq!(to_title_case(""), "");
    }
}
