//! PDF text layer extraction using lopdf.
//!
//! Walks each page's content stream and reports every shown string as a
//! [`PositionedFragment`] at its user-space origin, with the effective font
//! size (`Tf` size scaled by the text and graphics matrices).

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId, Stream};

use crate::detect::detect_format_from_path;
use crate::error::{Error, Result};
use crate::model::{Document, Page, PositionedFragment};

use super::options::ParseOptions;

/// TJ adjustments (thousandths of text space) wider than this become a space.
const SPACE_THRESHOLD: f32 = 200.0;

/// PDF text layer parser.
pub struct PdfParser {
    doc: LopdfDocument,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a PDF
        detect_format_from_path(path)?;

        let doc = LopdfDocument::load(path)?;
        Ok(Self { doc, options })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc, options })
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Number of pages in the PDF.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Extract fragments for every selected page.
    pub fn parse(&self) -> Result<Document> {
        let mut document = Document::new();
        let page_ids = self.doc.get_pages();
        document.metadata.source_format = Some(format!("PDF {}", self.doc.version));
        document.metadata.page_count = page_ids.len() as u32;

        for (&page_num, &page_id) in page_ids.iter() {
            if !self.options.pages.includes(page_num) {
                continue;
            }

            match self.page_fragments(page_id) {
                Ok(fragments) => {
                    log::debug!("Page {}: {} fragments", page_num, fragments.len());
                    document.add_page(Page::with_fragments(page_num, fragments));
                }
                Err(e) => {
                    if self.options.is_strict() {
                        return Err(e);
                    }
                    // In lenient mode, skip this page
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                }
            }
        }

        Ok(document)
    }

    /// Extract the fragments of one page (1-indexed).
    pub fn extract_page_fragments(&self, page_num: u32) -> Result<Vec<PositionedFragment>> {
        let pages = self.doc.get_pages();
        let page_id = pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;
        self.page_fragments(*page_id)
    }

    fn page_fragments(&self, page_id: ObjectId) -> Result<Vec<PositionedFragment>> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let content = self.get_page_content(page_id)?;
        self.parse_content_stream(&content, &fonts)
    }

    /// Get page content stream.
    fn get_page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            // A page without content has no text
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(Object::Stream(s)) => stream_content(s),
                Ok(Object::Array(arr)) => self.concat_streams(arr),
                _ => Err(Error::PdfParse("Invalid content stream".to_string())),
            },
            Object::Array(arr) => self.concat_streams(arr),
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn concat_streams(&self, refs: &[Object]) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        for obj in refs {
            if let Object::Reference(r) = obj {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    content.extend_from_slice(&stream_content(s)?);
                    content.push(b' ');
                }
            }
        }
        Ok(content)
    }

    /// Walk a content stream and collect shown strings.
    fn parse_content_stream(
        &self,
        content: &[u8],
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    ) -> Result<Vec<PositionedFragment>> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut fragments = Vec::new();
        let mut state = TextState::default();
        let mut gs_stack: Vec<Matrix> = Vec::new();
        let mut font: Option<&Dictionary> = None;

        for op in content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "q" => gs_stack.push(state.ctm),
                "Q" => {
                    if let Some(ctm) = gs_stack.pop() {
                        state.ctm = ctm;
                    }
                }
                "cm" => {
                    if let Some(m) = matrix_operand(operands) {
                        state.ctm = m.multiply(&state.ctm);
                    }
                }
                "BT" => {
                    state.in_text = true;
                    state.text_matrix = Matrix::IDENTITY;
                    state.line_matrix = Matrix::IDENTITY;
                }
                "ET" => state.in_text = false,
                "Tf" => {
                    if operands.len() >= 2 {
                        if let Object::Name(font_name) = &operands[0] {
                            font = fonts.get(font_name).copied();
                        }
                        state.font_size = get_number(&operands[1]).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(get_number) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if operands.len() >= 2 {
                        let tx = get_number(&operands[0]).unwrap_or(0.0);
                        let ty = get_number(&operands[1]).unwrap_or(0.0);
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        state.move_line(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = matrix_operand(operands) {
                        state.text_matrix = m;
                        state.line_matrix = m;
                    }
                }
                "T*" => state.next_line(),
                "Tj" | "TJ" => {
                    if state.in_text {
                        let text = match operands.first() {
                            Some(Object::Array(items)) => self.decode_array(items, font),
                            Some(Object::String(bytes, _)) => self.decode(bytes, font),
                            _ => String::new(),
                        };
                        state.emit(text, &mut fragments);
                    }
                }
                "'" | "\"" => {
                    state.next_line();
                    if state.in_text {
                        let text_idx = if op.operator == "\"" { 2 } else { 0 };
                        if let Some(Object::String(bytes, _)) = operands.get(text_idx) {
                            let text = self.decode(bytes, font);
                            state.emit(text, &mut fragments);
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(fragments)
    }

    /// Decode with the font's encoding, falling back to byte heuristics.
    fn decode(&self, bytes: &[u8], font: Option<&Dictionary>) -> String {
        font.and_then(|f| f.get_font_encoding(&self.doc).ok())
            .and_then(|enc| LopdfDocument::decode_text(&enc, bytes).ok())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| decode_text_simple(bytes))
    }

    /// TJ: strings interleaved with kerning adjustments.
    fn decode_array(&self, items: &[Object], font: Option<&Dictionary>) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(bytes, font)),
                // Negative values move text to the right; large ones are word gaps
                other => {
                    if let Some(n) = get_number(other) {
                        if -n > SPACE_THRESHOLD {
                            push_word_gap(&mut combined);
                        }
                    }
                }
            }
        }
        combined
    }
}

/// Affine matrix `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translation(tx: f32, ty: f32) -> Self {
        Matrix {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    /// `self × other`
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Vertical scale factor.
    fn scale(&self) -> f32 {
        self.c.hypot(self.d)
    }
}

/// Text state tracked while walking a content stream.
#[derive(Debug, Clone)]
struct TextState {
    ctm: Matrix,
    text_matrix: Matrix,
    line_matrix: Matrix,
    font_size: f32,
    leading: f32,
    in_text: bool,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            ctm: Matrix::IDENTITY,
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            font_size: 12.0,
            // Default line leading (could be set by TL operator)
            leading: 12.0,
            in_text: false,
        }
    }
}

impl TextState {
    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).multiply(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    fn emit(&self, text: String, fragments: &mut Vec<PositionedFragment>) {
        if text.trim().is_empty() {
            return;
        }
        let rendering = self.text_matrix.multiply(&self.ctm);
        fragments.push(PositionedFragment::new(
            text,
            rendering.e,
            rendering.f,
            self.font_size * rendering.scale(),
        ));
    }
}

fn matrix_operand(operands: &[Object]) -> Option<Matrix> {
    if operands.len() < 6 {
        return None;
    }
    let n = |i: usize, default: f32| get_number(&operands[i]).unwrap_or(default);
    Some(Matrix {
        a: n(0, 1.0),
        b: n(1, 0.0),
        c: n(2, 0.0),
        d: n(3, 1.0),
        e: n(4, 0.0),
        f: n(5, 0.0),
    })
}

/// Helper to extract number from PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn push_word_gap(text: &mut String) {
    match text.chars().last() {
        Some(c) if c != ' ' && c != '\u{00A0}' && !is_spaceless_script_char(c) => text.push(' '),
        _ => {}
    }
}

/// Check if character is from a script that doesn't use word spaces.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF       // CJK Unified Ideographs
        | 0x3400..=0x4DBF     // Extension A
        | 0x20000..=0x2EBEF   // Extensions B-F
        | 0x3040..=0x30FF     // Hiragana, Katakana
        | 0x3000..=0x303F)    // CJK Symbols and Punctuation
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = body
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// Stream bytes, decoded only when the stream declares a filter.
fn stream_content(stream: &Stream) -> Result<Vec<u8>> {
    if stream.dict.get(b"Filter").is_err() {
        return Ok(stream.content.clone());
    }
    stream
        .decompressed_content()
        .map_err(|e| Error::PdfParse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::dictionary;

    /// One page per content stream, Helvetica as F1.
    fn build_pdf(pages: Vec<Vec<Operation>>) -> Vec<u8> {
        let mut doc = LopdfDocument::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for operations in pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    fn show(text: &str, size: i64, x: i64, y: i64) -> Vec<Operation> {
        vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]
    }

    #[test]
    fn test_extract_positions_and_sizes() {
        let mut ops = show("John Smith", 18, 50, 700);
        ops.extend(show("john@x.com", 10, 50, 680));
        let data = build_pdf(vec![ops]);

        let doc = PdfParser::from_bytes(&data).unwrap().parse().unwrap();
        assert_eq!(doc.page_count(), 1);
        let frags = &doc.pages[0].fragments;
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[0].text, "John Smith");
        assert_eq!((frags[0].x, frags[0].y, frags[0].font_size), (50.0, 700.0, 18.0));
        assert_eq!(frags[1].font_size, 10.0);
        assert_eq!(doc.metadata.source_format.as_deref(), Some("PDF 1.5"));
    }

    #[test]
    fn test_text_matrix_scales_font_size() {
        let ops = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 1.into()]),
            Operation::new(
                "Tm",
                vec![14.into(), 0.into(), 0.into(), 14.into(), 72.into(), 500.into()],
            ),
            Operation::new("Tj", vec![Object::string_literal("SKILLS")]),
            Operation::new("T*", vec![]),
            Operation::new(
                "TJ",
                vec![Object::Array(vec![
                    Object::string_literal("Rust"),
                    Object::Integer(-300),
                    Object::string_literal("Go"),
                ])],
            ),
            Operation::new("ET", vec![]),
        ];
        let data = build_pdf(vec![ops]);

        let frags = PdfParser::from_bytes(&data)
            .unwrap()
            .extract_page_fragments(1)
            .unwrap();
        assert_eq!(frags[0].font_size, 14.0);
        assert_eq!((frags[0].x, frags[0].y), (72.0, 500.0));
        assert_eq!(frags[1].text, "Rust Go");
        // T* moves down by the default leading, scaled by the text matrix
        assert_eq!(frags[1].y, 500.0 - 12.0 * 14.0);
    }

    #[test]
    fn test_ctm_applies_to_positions() {
        let mut ops = vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![2.into(), 0.into(), 0.into(), 2.into(), 10.into(), 20.into()],
            ),
        ];
        ops.extend(show("Scaled", 10, 5, 5));
        ops.push(Operation::new("Q", vec![]));
        ops.extend(show("Plain", 10, 5, 5));
        let data = build_pdf(vec![ops]);

        let frags = PdfParser::from_bytes(&data)
            .unwrap()
            .extract_page_fragments(1)
            .unwrap();
        assert_eq!((frags[0].x, frags[0].y, frags[0].font_size), (20.0, 30.0, 20.0));
        assert_eq!((frags[1].x, frags[1].y, frags[1].font_size), (5.0, 5.0, 10.0));
    }

    #[test]
    fn test_page_selection_and_range() {
        let data = build_pdf(vec![show("One", 10, 0, 0), show("Two", 10, 0, 0)]);
        let options = ParseOptions::new().with_page_range(2..=2);
        let parser = PdfParser::from_bytes_with_options(&data, options).unwrap();
        assert_eq!(parser.page_count(), 2);

        let doc = parser.parse().unwrap();
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.metadata.page_count, 2);
        assert_eq!(doc.pages[0].number, 2);
        assert_eq!(doc.pages[0].fragments[0].text, "Two");

        assert!(matches!(
            parser.extract_page_fragments(5),
            Err(Error::PageOutOfRange(5, 2))
        ));
    }

    #[test]
    fn test_invalid_bytes() {
        assert!(PdfParser::from_bytes(b"not a pdf").is_err());
    }

    #[test]
    fn test_matrix_multiply() {
        let m = Matrix::translation(5.0, 5.0).multiply(&Matrix {
            a: 2.0,
            d: 2.0,
            e: 10.0,
            f: 20.0,
            ..Matrix::IDENTITY
        });
        assert_eq!((m.e, m.f, m.scale()), (20.0, 30.0, 2.0));
    }

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x41, 0x00, 0x42]), "AB");
        assert_eq!(decode_text_simple(&[0x63, 0x61, 0x66, 0xE9]), "caf\u{e9}");
    }

    #[test]
    fn test_word_gap() {
        let mut text = "Rust".to_string();
        push_word_gap(&mut text);
        push_word_gap(&mut text);
        assert_eq!(text, "Rust ");

        let mut cjk = "漢".to_string();
        push_word_gap(&mut cjk);
        assert_eq!(cjk, "漢");
    }

    #[test]
    fn test_unfiltered_content_stream() {
        let data = build_pdf(vec![show("Plain stream", 10, 50, 700)]);
        let doc = PdfParser::from_bytes(&data).unwrap().parse().unwrap();
        assert_eq!(doc.fragment_count(), 1);
        assert_eq!(doc.pages[0].fragments[0].text, "Plain stream");
    }

    #[test]
    fn test_mixed_content_stream_array() {
        let repeated: Vec<Operation> = (0..20).flat_map(|_| show("Compressed", 10, 50, 700)).collect();
        let mut compressed = Stream::new(dictionary! {}, Content { operations: repeated }.encode().unwrap());
        compressed.compress().unwrap();
        assert!(compressed.dict.get(b"Filter").is_ok());
        let plain = Stream::new(
            dictionary! {},
            Content { operations: show("Plain", 10, 50, 680) }.encode().unwrap(),
        );

        let mut doc = LopdfDocument::with_version("1.5");
        let first = doc.add_object(compressed);
        let second = doc.add_object(plain);
        let parser = PdfParser {
            doc,
            options: ParseOptions::default(),
        };
        let content = parser
            .concat_streams(&[Object::Reference(first), Object::Reference(second)])
            .unwrap();

        let shown: Vec<Vec<u8>> = Content::decode(&content)
            .unwrap()
            .operations
            .into_iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first().and_then(|o| o.as_str().ok()).map(<[u8]>::to_vec))
            .collect();
        assert_eq!(shown.len(), 21);
        assert_eq!(shown[20], b"Plain".to_vec());
    }
}
