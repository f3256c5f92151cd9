//! Visitor pattern for customizing Markdown rendering.
//!
//! The visitor pattern allows users to customize how different output
//! blocks are rendered without modifying the core rendering logic.
//!
//! # Example
//!
//! ```
//! use cvlayout::render::visitor::{OutputVisitor, VisitorAction};
//!
//! struct NoContactLine;
//!
//! impl OutputVisitor for NoContactLine {
//!     fn visit_paragraph(&mut self, text: &str) -> VisitorAction {
//!         if text.contains('@') {
//!             VisitorAction::Skip
//!         } else {
//!             VisitorAction::Continue
//!         }
//!     }
//! }
//! ```

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the element with custom output.
    Replace(String),

    /// Skip this element entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the element should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting output blocks during Markdown rendering.
///
/// All methods return `VisitorAction::Continue` by default. A replacement
/// is written verbatim, so it should carry its own trailing newlines.
pub trait OutputVisitor: Send + Sync {
    /// Called before rendering the title.
    fn visit_title(&mut self, text: &str) -> VisitorAction {
        let _ = text;
        VisitorAction::Continue
    }

    /// Called before rendering a section heading.
    fn visit_heading(&mut self, text: &str) -> VisitorAction {
        let _ = text;
        VisitorAction::Continue
    }

    /// Called before rendering a sub-heading.
    fn visit_subheading(&mut self, text: &str) -> VisitorAction {
        let _ = text;
        VisitorAction::Continue
    }

    /// Called before rendering a paragraph, including the contact line.
    fn visit_paragraph(&mut self, text: &str) -> VisitorAction {
        let _ = text;
        VisitorAction::Continue
    }

    /// Called before rendering a list item.
    fn visit_bullet_item(&mut self, text: &str) -> VisitorAction {
        let _ = text;
        VisitorAction::Continue
    }

    /// Called before rendering a skills grid.
    ///
    /// # Arguments
    /// * `items` - Matched skills in display order
    /// * `columns` - Cells per row
    fn visit_skills_grid(&mut self, items: &[String], columns: usize) -> VisitorAction {
        let _ = (items, columns);
        VisitorAction::Continue
    }
}

/// Default visitor that performs no customization.
///
/// All visit methods return `VisitorAction::Continue`.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl OutputVisitor for DefaultVisitor {}

/// Visitor that renders skills grids as one comma-separated line.
#[derive(Debug, Clone, Default)]
pub struct InlineSkillsVisitor;

impl OutputVisitor for InlineSkillsVisitor {
    fn visit_skills_grid(&mut self, items: &[String], _columns: usize) -> VisitorAction {
        VisitorAction::Replace(format!("{}\n\n", items.join(", ")))
    }
}

/// Visitor that drops the title and every paragraph containing an email.
#[derive(Debug, Clone, Default)]
pub struct AnonymizeVisitor;

impl OutputVisitor for AnonymizeVisitor {
    fn visit_title(&mut self, _text: &str) -> VisitorAction {
        VisitorAction::Skip
    }

    fn visit_paragraph(&mut self, text: &str) -> VisitorAction {
        if text.contains('@') {
            VisitorAction::Skip
        } else {
            VisitorAction::Continue
        }
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn OutputVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: OutputVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    /// Number of chained visitors.
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    fn first_action<F>(&mut self, mut visit: F) -> VisitorAction
    where
        F: FnMut(&mut dyn OutputVisitor) -> VisitorAction,
    {
        for visitor in &mut self.visitors {
            let action = visit(visitor.as_mut());
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputVisitor for CompositeVisitor {
    fn visit_title(&mut self, text: &str) -> VisitorAction {
        self.first_action(|v| v.visit_title(text))
    }

    fn visit_heading(&mut self, text: &str) -> VisitorAction {
        self.first_action(|v| v.visit_heading(text))
    }

    fn visit_subheading(&mut self, text: &str) -> VisitorAction {
        self.first_action(|v| v.visit_subheading(text))
    }

    fn visit_paragraph(&mut self, text: &str) -> VisitorAction {
        self.first_action(|v| v.visit_paragraph(text))
    }

    fn visit_bullet_item(&mut self, text: &str) -> VisitorAction {
        self.first_action(|v| v.visit_bullet_item(text))
    }

    fn visit_skills_grid(&mut self, items: &[String], columns: usize) -> VisitorAction {
        self.first_action(|v| v.visit_skills_grid(items, columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visitor_action_default() {
        let action = VisitorAction::default();
        assert!(matches!(action, VisitorAction::Continue));
    }

    #[test]
    fn test_visitor_action_should_skip() {
        assert!(!VisitorAction::Continue.should_skip());
        assert!(!VisitorAction::Replace("test".into()).should_skip());
        assert!(VisitorAction::Skip.should_skip());
    }

    #[test]
    fn test_visitor_action_replacement() {
        assert!(VisitorAction::Continue.replacement().is_none());
        assert!(VisitorAction::Skip.replacement().is_none());
        assert_eq!(
            VisitorAction::Replace("hello".into()).replacement(),
            Some("hello")
        );
    }

    #[test]
    fn test_default_visitor() {
        let mut visitor = DefaultVisitor::new();
        assert_eq!(visitor.visit_paragraph("text"), VisitorAction::Continue);
        assert_eq!(visitor.visit_skills_grid(&[], 3), VisitorAction::Continue);
    }

    #[test]
    fn test_inline_skills_visitor() {
        let mut visitor = InlineSkillsVisitor;
        let items = vec!["Rust".to_string(), "Go".to_string()];
        let action = visitor.visit_skills_grid(&items, 3);
        assert_eq!(action.replacement(), Some("Rust, Go\n\n"));
    }

    #[test]
    fn test_anonymize_visitor() {
        let mut visitor = AnonymizeVisitor;
        assert!(visitor.visit_title("Jane Doe").should_skip());
        assert!(visitor.visit_paragraph("jane@doe.dev • Lisbon, Portugal").should_skip());
        assert!(!visitor.visit_paragraph("Built things.").should_skip());
    }

    #[test]
    fn test_composite_visitor() {
        let mut composite = CompositeVisitor::new()
            .with_visitor(DefaultVisitor)
            .with_visitor(AnonymizeVisitor)
            .with_visitor(InlineSkillsVisitor);
        assert_eq!(composite.len(), 3);

        assert!(composite.visit_title("Jane Doe").should_skip());
        assert!(composite.visit_skills_grid(&["Rust".to_string()], 3).is_replace());
        assert_eq!(composite.visit_heading("EDUCATION"), VisitorAction::Continue);
    }
}
