//! Line classification into headers, subsections, bullets and text.
//!
//! Rules are evaluated in precedence order, first match wins:
//!
//! 1. **Header**: contains a section keyword; or all-caps, longer than
//!    `header_min_len` with a font above `header_font_size`; or short,
//!    all-caps and followed by a bullet or an indented body line.
//! 2. **Bullet**: starts with a bullet glyph, a dash and a space, or list
//!    numbering; or is indented past `bullet_continuation_indent` right
//!    after another bullet.
//! 3. **Subsection**: mentions a date range, "Present" or a month name; or is
//!    a single all-caps token; or is exactly a "City, ST" location.
//! 4. **Text** otherwise.
//!
//! Look-behind (bullet continuation) is carried as state through a single
//! left-to-right pass. Look-ahead (header body) inspects only the next
//! line's own bullet marker and indentation, so classification never
//! recurses.

use regex::Regex;

use crate::model::{BlockKind, Line};

use super::LayoutOptions;

/// Compiled matchers for the classification rules.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    options: LayoutOptions,
    keywords: Vec<String>,
    bullet_marker: Regex,
    date_pattern: Regex,
    location_line: Regex,
}

impl LineClassifier {
    /// Build a classifier for the given options.
    pub fn new(options: LayoutOptions) -> Self {
        let keywords = options
            .header_keywords
            .iter()
            .map(|k| k.trim().to_uppercase())
            .filter(|k| !k.is_empty())
            .collect();

        Self {
            options,
            keywords,
            bullet_marker: Regex::new(r"^(?:[•●○]|[-–]\s|\d+[.)]\s)").unwrap(),
            date_pattern: Regex::new(
                r"\b\d{4}\s*[-–—]\s*(?:\d{4}|(?i:present|current))\b|\bPresent\b|\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\b",
            )
            .unwrap(),
            location_line: Regex::new(
                r"^[A-Z][A-Za-z.'\-]*(?:\s[A-Z][A-Za-z.'\-]*)*,\s*(?:[A-Z]{2}|[A-Z][A-Za-z]+(?:\s[A-Z][A-Za-z]+)*)$",
            )
            .unwrap(),
        }
    }

    /// Options this classifier was built with.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Classify every line of a page in one pass.
    pub fn classify_lines(&self, lines: &[Line]) -> Vec<BlockKind> {
        let mut kinds = Vec::with_capacity(lines.len());
        let mut prev_bullet = false;
        for index in 0..lines.len() {
            let kind = self.classify_at(lines, index, prev_bullet);
            prev_bullet = kind == BlockKind::Bullet;
            kinds.push(kind);
        }
        kinds
    }

    /// Classify the line at `index` within its page.
    ///
    /// An out-of-range index classifies as [`BlockKind::Text`].
    pub fn classify(&self, index: usize, lines: &[Line]) -> BlockKind {
        if index >= lines.len() {
            return BlockKind::Text;
        }
        let mut prev_bullet = false;
        for i in 0..index {
            prev_bullet = self.classify_at(lines, i, prev_bullet) == BlockKind::Bullet;
        }
        self.classify_at(lines, index, prev_bullet)
    }

    fn classify_at(&self, lines: &[Line], index: usize, prev_bullet: bool) -> BlockKind {
        let line = &lines[index];
        let text = line.text.trim();

        if self.is_header(text, line, lines.get(index + 1)) {
            BlockKind::Header
        } else if self.has_bullet_marker(text)
            || (prev_bullet && line.x > self.options.bullet_continuation_indent)
        {
            BlockKind::Bullet
        } else if self.is_subsection(text) {
            BlockKind::Subsection
        } else {
            BlockKind::Text
        }
    }

    fn is_header(&self, text: &str, line: &Line, next: Option<&Line>) -> bool {
        if self.contains_keyword(text) {
            return true;
        }

        let caps = is_all_caps(text);
        let len = text.chars().count();

        if caps && len > self.options.header_min_len && line.font_size > self.options.header_font_size
        {
            return true;
        }

        match next {
            Some(next) if caps && len < self.options.short_header_max_len => {
                self.has_bullet_marker(next.text.trim())
                    || next.x > self.options.header_body_indent
            }
            _ => false,
        }
    }

    /// Check for a section keyword (case-insensitive substring).
    pub fn contains_keyword(&self, text: &str) -> bool {
        let upper = text.to_uppercase();
        self.keywords.iter().any(|k| upper.contains(k.as_str()))
    }

    /// Check for a leading bullet glyph, dash or list number.
    pub fn has_bullet_marker(&self, text: &str) -> bool {
        self.bullet_marker.is_match(text)
    }

    fn is_subsection(&self, text: &str) -> bool {
        if self.date_pattern.is_match(text) {
            return true;
        }

        let (min, max) = self.options.subsection_token_len;
        let len = text.chars().count();
        if (min..=max).contains(&len) && is_all_caps(text) && !text.contains(' ') {
            return true;
        }

        self.location_line.is_match(text)
    }
}

/// Text equal to its own upper-case form.
pub(crate) fn is_all_caps(text: &str) -> bool {
    text.to_uppercase() == text
}
