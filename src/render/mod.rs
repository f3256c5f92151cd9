//! Rendering module for turning content blocks into output formats.

mod cleanup;
mod document;
mod json;
mod markdown;
mod options;
mod result;
mod text;
pub mod visitor;

pub use cleanup::{clean_text, CleanupOptions, CleanupPipeline, CleanupPreset};
pub use document::{render, DocumentRenderer};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::RenderOptions;
pub use result::{ExtractionStats, StructuredResume};
pub use text::to_text;
pub use visitor::{CompositeVisitor, DefaultVisitor, OutputVisitor, VisitorAction};
