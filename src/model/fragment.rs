//! Positioned text fragments as reported by a PDF text layer.

use serde::{Deserialize, Serialize};

/// One raw run of text with its baseline origin and effective font size.
///
/// Fragments deserialize leniently: a missing `text` becomes empty (and is
/// later filtered out), missing numbers become `0.0`. The pdf.js text item
/// shape (`str` + `transform`) is accepted as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawFragment")]
pub struct PositionedFragment {
    /// The text content
    pub text: String,
    /// X position of the baseline origin
    pub x: f32,
    /// Y position of the baseline origin (PDF space, grows upwards)
    pub y: f32,
    /// Effective font size in points
    #[serde(rename = "fontSize")]
    pub font_size: f32,
}

impl PositionedFragment {
    /// Create a new fragment.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
        }
    }

    /// Check if the fragment carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Wire shape accepted when decoding fragments.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFragment {
    #[serde(alias = "str")]
    text: Option<String>,
    x: Option<f32>,
    y: Option<f32>,
    #[serde(rename = "fontSize", alias = "font_size")]
    font_size: Option<f32>,
    transform: Option<Vec<f32>>,
}

impl From<RawFragment> for PositionedFragment {
    fn from(raw: RawFragment) -> Self {
        // [a, b, c, d, e, f]: translation in e/f, vertical scale from c/d
        let matrix = raw.transform.filter(|t| t.len() >= 6);
        let (tx, ty, scale) = match matrix {
            Some(t) => (Some(t[4]), Some(t[5]), Some(t[2].hypot(t[3]))),
            None => (None, None, None),
        };

        Self {
            text: raw.text.unwrap_or_default(),
            x: raw.x.or(tx).unwrap_or(0.0),
            y: raw.y.or(ty).unwrap_or(0.0),
            font_size: raw.font_size.or(scale).unwrap_or(0.0),
        }
    }
}
