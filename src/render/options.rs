//! Rendering options and configuration.

use super::{CleanupOptions, CleanupPreset};
use crate::extract::DEFAULT_NAME_WINDOW;
use crate::model::DEFAULT_GRID_COLUMNS;
use crate::vocabulary::DEFAULT_SKILLS;

/// Options for turning content blocks into output blocks.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Skills matched inside a skills section, in display order
    pub skill_vocabulary: Vec<String>,

    /// Header text (case-insensitive substring) that starts skills mode
    pub skills_keyword: String,

    /// Enable skills mode; when off, skills sections render like any other
    pub skills_grid: bool,

    /// Cells per row in a skills grid
    pub grid_columns: usize,

    /// Separator between contact details in the synthesized contact line
    pub contact_separator: String,

    /// Blocks searched for the candidate's name
    pub name_window: usize,

    /// Drop body blocks that repeat the synthesized title or contact line
    pub dedupe_contact: bool,

    /// Character to use for unordered list markers
    pub list_marker: char,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,

    /// Text cleanup options
    pub cleanup: CleanupOptions,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the skill vocabulary.
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skill_vocabulary = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Set the header keyword that starts skills mode.
    pub fn with_skills_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.skills_keyword = keyword.into();
        self
    }

    /// Enable or disable the skills grid.
    pub fn with_skills_grid(mut self, enabled: bool) -> Self {
        self.skills_grid = enabled;
        self
    }

    /// Set the number of grid columns (at least 1).
    pub fn with_grid_columns(mut self, columns: usize) -> Self {
        self.grid_columns = columns.max(1);
        self
    }

    /// Set the contact line separator.
    pub fn with_contact_separator(mut self, separator: impl Into<String>) -> Self {
        self.contact_separator = separator.into();
        self
    }

    /// Set how many leading blocks are searched for a name.
    pub fn with_name_window(mut self, window: usize) -> Self {
        self.name_window = window;
        self
    }

    /// Enable or disable contact deduplication.
    pub fn with_contact_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe_contact = dedupe;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = CleanupOptions::from_preset(preset);
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            skill_vocabulary: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            skills_keyword: "SKILLS".to_string(),
            skills_grid: true,
            grid_columns: DEFAULT_GRID_COLUMNS,
            contact_separator: " • ".to_string(),
            name_window: DEFAULT_NAME_WINDOW,
            dedupe_contact: false,
            list_marker: '-',
            escape_special_chars: true,
            cleanup: CleanupOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.skills_keyword, "SKILLS");
        assert_eq!(options.grid_columns, 3);
        assert_eq!(options.contact_separator, " • ");
        assert!(!options.dedupe_contact);
        assert!(options.skill_vocabulary.iter().any(|s| s == "Python"));
    }

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_skills(["Rust", "Go"])
            .with_grid_columns(0)
            .with_contact_dedupe(true)
            .with_cleanup_preset(CleanupPreset::Minimal);

        assert_eq!(options.skill_vocabulary, vec!["Rust", "Go"]);
        assert_eq!(options.grid_columns, 1);
        assert!(options.dedupe_contact);
        assert_eq!(options.cleanup, CleanupOptions::minimal());
    }
}
