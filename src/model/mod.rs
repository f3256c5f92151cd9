//! Data model for resume structuring.
//!
//! The types here are the intermediate representation flowing through the
//! pipeline: fragments from a text layer, reconstructed lines, classified
//! blocks, derived contact/skill data and the format-agnostic output blocks.
//! None of it is persisted; everything is created per conversion.

mod block;
mod document;
mod fragment;
mod line;
mod output;
mod profile;

pub use block::{BlockKind, ContentBlock};
pub use document::{Document, Metadata, Page};
pub use fragment::PositionedFragment;
pub use line::Line;
pub use output::{OutputBlock, DEFAULT_GRID_COLUMNS};
pub use profile::{ContactInfo, SkillSet};
