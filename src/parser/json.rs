//! Fragment dump decoding.
//!
//! A fragment dump is the JSON a PDF text layer produces when it is run
//! outside this crate. Three shapes are accepted:
//!
//! ```json
//! {"pages": [{"number": 1, "fragments": [{"text": "EXPERIENCE", "x": 50, "y": 700, "fontSize": 14}]}]}
//! [[{"str": "EXPERIENCE", "transform": [14, 0, 0, 14, 50, 700]}]]
//! [{"text": "EXPERIENCE", "x": 50, "y": 700, "fontSize": 14}]
//! ```
//!
//! The last form is a single page. Missing fragment fields default to empty
//! text or zero.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Document, Page, PositionedFragment};

use super::options::ParseOptions;

#[derive(Deserialize)]
#[serde(untagged)]
enum PageDump {
    Numbered {
        #[serde(default)]
        number: Option<u32>,
        #[serde(default)]
        fragments: Vec<PositionedFragment>,
    },
    Bare(Vec<PositionedFragment>),
}

/// Decoder for JSON fragment dumps.
#[derive(Debug, Clone, Default)]
pub struct FragmentParser {
    options: ParseOptions,
}

impl FragmentParser {
    /// Create a parser with the given options.
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Decode a fragment dump.
    pub fn parse(&self, data: &[u8]) -> Result<Document> {
        let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
        let value: Value = serde_json::from_slice(data)?;
        let pages = split_pages(value)?;
        let total = pages.len() as u32;

        let mut document = Document::new();
        document.metadata.source_format = Some("fragments".to_string());
        document.metadata.page_count = total;

        for (index, value) in pages.into_iter().enumerate() {
            let fallback = index as u32 + 1;
            let page = match serde_json::from_value::<PageDump>(value) {
                Ok(PageDump::Numbered { number, fragments }) => {
                    Page::with_fragments(number.unwrap_or(fallback), fragments)
                }
                Ok(PageDump::Bare(fragments)) => Page::with_fragments(fallback, fragments),
                Err(e) => {
                    if self.options.is_strict() {
                        return Err(Error::FragmentDecode(e));
                    }
                    log::warn!("Skipping page {}: {}", fallback, e);
                    continue;
                }
            };

            if self.options.pages.includes(page.number) {
                document.add_page(page);
            }
        }

        log::debug!(
            "Decoded {} of {} pages ({} fragments)",
            document.pages.len(),
            total,
            document.fragment_count()
        );
        Ok(document)
    }
}

/// Decode a fragment dump with default options.
pub fn parse_fragments(data: &[u8]) -> Result<Document> {
    FragmentParser::default().parse(data)
}

fn split_pages(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Object(mut map) => match map.remove("pages") {
            Some(Value::Array(pages)) => Ok(pages),
            _ => Err(Error::Other(
                "fragment dump object has no \"pages\" array".to_string(),
            )),
        },
        Value::Array(items)
            if !items.is_empty()
                && items.iter().all(Value::is_object)
                && !items.iter().any(is_page_object) =>
        {
            Ok(vec![Value::Array(items)])
        }
        Value::Array(pages) => Ok(pages),
        _ => Err(Error::UnknownFormat),
    }
}

fn is_page_object(value: &Value) -> bool {
    value.get("fragments").is_some()
}
