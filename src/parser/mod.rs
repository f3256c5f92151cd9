//! Fragment sources: PDF text layers and JSON fragment dumps.

mod json;
mod options;
#[cfg(feature = "pdf")]
mod pdf;

pub use json::{parse_fragments, FragmentParser};
pub use options::{ErrorMode, PageSelection, ParseOptions};
#[cfg(feature = "pdf")]
pub use pdf::PdfParser;
