//! Text cleanup applied to every emitted block.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Entity unescaping, placeholder removal and whitespace collapsing only
    Minimal,
    /// Minimal + Unicode NFC, ligature folding and U+FFFD removal
    #[default]
    Standard,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Unescape `&amp;`, `&lt;`, `&gt;`, `&quot;` and `&#39;`
    pub unescape_entities: bool,

    /// Remove literal `[object Object]` placeholders
    pub remove_object_placeholders: bool,

    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Fix ligatures (fi, fl, etc.)
    pub fix_ligatures: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Collapse whitespace runs to a single space and trim
    pub collapse_whitespace: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            unescape_entities: true,
            remove_object_placeholders: true,
            normalize_unicode: false,
            fix_ligatures: false,
            remove_replacement_char: false,
            collapse_whitespace: true,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            remove_replacement_char: true,
            ..Self::minimal()
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
///
/// The pipeline is idempotent: every stage is repeated until the text stops
/// changing, so `process(process(s)) == process(s)` for any input, including
/// nested entities such as `&amp;amp;`.
#[derive(Debug, Clone)]
pub struct CleanupPipeline {
    options: CleanupOptions,
    entity_regex: Regex,
    ligature_map: Vec<(&'static str, &'static str)>,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self {
            options,
            entity_regex: Regex::new(r"&(?:amp|lt|gt|quot|#39);").unwrap(),
            ligature_map: vec![
                ("\u{FB00}", "ff"),  // ﬀ
                ("\u{FB01}", "fi"),  // ﬁ
                ("\u{FB02}", "fl"),  // ﬂ
                ("\u{FB03}", "ffi"), // ﬃ
                ("\u{FB04}", "ffl"), // ﬄ
                ("\u{FB05}", "st"),  // ﬅ (long s + t)
                ("\u{FB06}", "st"),  // ﬆ
            ],
        }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Options in effect.
    pub fn options(&self) -> &CleanupOptions {
        &self.options
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut current = self.pass(text);
        // Past the first pass, any change shortens the text
        loop {
            let next = self.pass(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn pass(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.unescape_entities {
            result = self.unescape_entities(&result);
        }

        if self.options.remove_object_placeholders {
            result = result.replace("[object Object]", "");
        }

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.fix_ligatures {
            for (ligature, replacement) in &self.ligature_map {
                result = result.replace(ligature, replacement);
            }
        }

        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }

        if self.options.collapse_whitespace {
            result = result.split_whitespace().collect::<Vec<_>>().join(" ");
        }

        result
    }

    fn unescape_entities(&self, text: &str) -> String {
        self.entity_regex
            .replace_all(text, |caps: &regex::Captures| match &caps[0] {
                "&amp;" => "&",
                "&lt;" => "<",
                "&gt;" => ">",
                "&quot;" => "\"",
                _ => "'",
            })
            .to_string()
    }
}

impl Default for CleanupPipeline {
    fn default() -> Self {
        Self::new(CleanupOptions::default())
    }
}

/// Clean text with the standard preset.
pub fn clean_text(text: &str) -> String {
    CleanupPipeline::default().process(text)
}
