//! Derived data extracted from the block stream.

mod contact;
mod skills;

pub use contact::{extract_contact, ContactExtractor, DEFAULT_NAME_WINDOW};
pub use skills::extract_skills;
