//! # cvlayout
//!
//! Resume structure reconstruction from positioned PDF text runs.
//!
//! A PDF text layer is a flat list of text fragments with coordinates and
//! font sizes. This library rebuilds visual lines from them, classifies each
//! line as a section header, subsection, bullet or body text, merges wrapped
//! paragraphs, extracts contact details and skills, and renders a clean
//! resume layout as Markdown, plain text or JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cvlayout::{parse_file, structure, render};
//!
//! fn main() -> cvlayout::Result<()> {
//!     // Load fragments from a PDF (or a JSON fragment dump)
//!     let doc = parse_file("resume.pdf")?;
//!
//!     // Classify, merge and render
//!     let resume = structure(&doc);
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&resume.output, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Line reconstruction**: groups fragments sharing a baseline
//! - **Section classification**: keyword, font-size and indentation heuristics
//! - **Contact extraction**: name, email, phone and location
//! - **Skills grid**: vocabulary matching inside the skills section
//! - **Parallel processing**: Uses Rayon for multi-page documents
//! - **Cleanup pipeline**: entity unescaping and Unicode normalization

pub mod detect;
pub mod error;
pub mod extract;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;
pub mod vocabulary;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, InputFormat};
pub use error::{Error, Result};
pub use extract::{extract_contact, extract_skills};
pub use layout::{LayoutAnalyzer, LayoutOptions};
pub use model::{
    BlockKind, ContactInfo, ContentBlock, Document, Line, Metadata, OutputBlock, Page,
    PositionedFragment, SkillSet,
};
pub use parser::{parse_fragments, ErrorMode, FragmentParser, PageSelection, ParseOptions};
#[cfg(feature = "pdf")]
pub use parser::PdfParser;
pub use render::{
    CleanupOptions, CleanupPreset, DocumentRenderer, ExtractionStats, JsonFormat, RenderOptions,
    StructuredResume,
};
pub use vocabulary::Vocabulary;

use std::path::Path;

use extract::ContactExtractor;

/// Load fragments from a PDF or a JSON fragment dump.
///
/// The input format is detected from the file content, not its extension.
///
/// # Arguments
///
/// * `path` - Path to the PDF or fragment dump
///
/// # Example
///
/// ```no_run
/// use cvlayout::parse_file;
///
/// let doc = parse_file("resume.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Load fragments from a file with custom options.
///
/// # Example
///
/// ```no_run
/// use cvlayout::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient().with_page_range(1..=2);
/// let doc = parse_file_with_options("resume.pdf", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let data = std::fs::read(path)?;
    parse_bytes_with_options(&data, options)
}

/// Load fragments from bytes.
///
/// # Arguments
///
/// * `data` - PDF file content or a JSON fragment dump
///
/// # Example
///
/// ```
/// use cvlayout::parse_bytes;
///
/// let doc = parse_bytes(br#"[{"text": "EXPERIENCE", "x": 50, "y": 700, "fontSize": 14}]"#).unwrap();
/// assert_eq!(doc.fragment_count(), 1);
/// ```
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    parse_bytes_with_options(data, ParseOptions::default())
}

/// Load fragments from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let format = detect_format_from_bytes(data)?;
    log::debug!("Detected input format: {}", format);
    match format {
        InputFormat::Pdf { .. } => parse_pdf_bytes(data, options),
        InputFormat::Fragments => FragmentParser::new(options).parse(data),
    }
}

#[cfg(feature = "pdf")]
fn parse_pdf_bytes(data: &[u8], options: ParseOptions) -> Result<Document> {
    PdfParser::from_bytes_with_options(data, options)?.parse()
}

#[cfg(not(feature = "pdf"))]
fn parse_pdf_bytes(_data: &[u8], _options: ParseOptions) -> Result<Document> {
    Err(Error::PdfUnsupported)
}

/// Load fragments from a file without blocking the async runtime.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> cvlayout::Result<()> {
/// let doc = cvlayout::parse_file_async("resume.pdf").await?;
/// let resume = cvlayout::structure(&doc);
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "async")]
pub async fn parse_file_async<P: AsRef<Path>>(path: P) -> Result<Document> {
    let data = tokio::fs::read(path).await?;
    parse_bytes(&data)
}

/// Structure a document with default options.
///
/// # Example
///
/// ```
/// use cvlayout::{structure, Document, OutputBlock, PositionedFragment};
///
/// let doc = Document::from_fragments(vec![vec![
///     PositionedFragment::new("EXPERIENCE", 50.0, 700.0, 14.0),
///     PositionedFragment::new("• Led migration of 12 services", 50.0, 680.0, 10.0),
/// ]]);
/// let resume = structure(&doc);
/// assert_eq!(resume.output.len(), 2);
/// assert!(matches!(resume.output[0], OutputBlock::Heading { .. }));
/// ```
pub fn structure(doc: &Document) -> StructuredResume {
    structure_with_options(doc, &LayoutOptions::default(), &RenderOptions::default())
}

/// Structure a document with custom layout and render options.
///
/// Runs line reconstruction, classification, merging, contact and skills
/// extraction and output rendering. Never fails: an empty document yields an
/// empty result.
pub fn structure_with_options(
    doc: &Document,
    layout_options: &LayoutOptions,
    render_options: &RenderOptions,
) -> StructuredResume {
    let analyzer = LayoutAnalyzer::new(layout_options.clone());
    let lines = analyzer.document_lines(doc);
    let numbered: Vec<(u32, &[Line])> = doc
        .pages
        .iter()
        .zip(&lines)
        .map(|(page, lines)| (page.number, lines.as_slice()))
        .collect();
    let blocks = analyzer.build_page_blocks(&numbered);

    let renderer = DocumentRenderer::new(render_options.clone());
    let contact = ContactExtractor::with_name_window(render_options.name_window).extract(&blocks);
    let skills = renderer.skills(&blocks);
    let output = renderer.render_with_contact(&blocks, &contact);

    let mut stats = ExtractionStats::new();
    stats.count_lines(&lines);
    stats.count_blocks(&blocks);
    stats.skill_count = skills.len() as u32;

    log::debug!(
        "Structured {} pages: {} lines, {} blocks, {} output blocks",
        stats.page_count,
        stats.line_count,
        blocks.len(),
        output.len()
    );

    StructuredResume {
        metadata: doc.metadata.clone(),
        contact,
        skills,
        blocks,
        output,
        stats,
    }
}

/// Convert a resume file to Markdown.
///
/// # Example
///
/// ```no_run
/// use cvlayout::to_markdown;
///
/// let markdown = to_markdown("resume.pdf").unwrap();
/// std::fs::write("resume.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    CvLayout::new().parse(path)?.to_markdown()
}

/// Convert a resume file to plain text.
///
/// # Example
///
/// ```no_run
/// use cvlayout::to_text;
///
/// let text = to_text("resume.pdf").unwrap();
/// println!("{}", text);
/// ```
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    CvLayout::new().parse(path)?.to_text()
}

/// Convert a resume file to JSON.
///
/// # Example
///
/// ```no_run
/// use cvlayout::{to_json, JsonFormat};
///
/// let json = to_json("resume.pdf", JsonFormat::Pretty).unwrap();
/// std::fs::write("structure.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    CvLayout::new().parse(path)?.to_json(format)
}

/// Builder for loading and structuring resumes.
///
/// # Example
///
/// ```no_run
/// use cvlayout::{CvLayout, Vocabulary};
///
/// let mut vocabulary = Vocabulary::default();
/// vocabulary.extend(Vocabulary::from_json(r#"{"skills": ["Elixir"]}"#)?);
///
/// let markdown = CvLayout::new()
///     .with_vocabulary(vocabulary)
///     .lenient()
///     .parse("resume.pdf")?
///     .to_markdown()?;
/// # Ok::<(), cvlayout::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CvLayout {
    parse_options: ParseOptions,
    layout_options: LayoutOptions,
    render_options: RenderOptions,
}

impl CvLayout {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set layout options.
    pub fn with_layout_options(mut self, options: LayoutOptions) -> Self {
        self.layout_options = options;
        self
    }

    /// Set render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Use the vocabulary's header keywords and skills.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.layout_options = self
            .layout_options
            .with_header_keywords(vocabulary.header_keywords);
        self.render_options = self.render_options.with_skills(vocabulary.skills);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.parse_options = self.parse_options.with_pages(pages);
        self
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.layout_options = self.layout_options.sequential();
        self
    }

    /// Load and structure a file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<CvLayoutResult> {
        let document = parse_file_with_options(path, self.parse_options.clone())?;
        Ok(self.structure_document(&document))
    }

    /// Load and structure bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<CvLayoutResult> {
        let document = parse_bytes_with_options(data, self.parse_options.clone())?;
        Ok(self.structure_document(&document))
    }

    /// Structure an already loaded document.
    pub fn structure_document(self, document: &Document) -> CvLayoutResult {
        let resume = structure_with_options(document, &self.layout_options, &self.render_options);
        CvLayoutResult {
            resume,
            render_options: self.render_options,
        }
    }
}

/// Result of structuring a resume.
#[derive(Debug, Clone)]
pub struct CvLayoutResult {
    /// The structured resume
    pub resume: StructuredResume,
    /// Render options to use
    render_options: RenderOptions,
}

impl CvLayoutResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.resume.output, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.resume.output, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.resume, format)
    }

    /// Extracted contact details.
    pub fn contact(&self) -> &ContactInfo {
        &self.resume.contact
    }

    /// Classified and merged content blocks.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.resume.blocks
    }

    /// Rendered output blocks.
    pub fn output(&self) -> &[OutputBlock] {
        &self.resume.output
    }

    /// Extraction statistics.
    pub fn stats(&self) -> &ExtractionStats {
        &self.resume.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn frag(text: &str, x: f32, y: f32, size: f32) -> PositionedFragment {
        PositionedFragment::new(text, x, y, size)
    }

    fn sample_dump() -> &'static [u8] {
        r#"{"pages": [{"number": 1, "fragments": [
            {"text": "Jane Doe", "x": 50, "y": 760, "fontSize": 18},
            {"text": "jane@example.com", "x": 50, "y": 740, "fontSize": 10},
            {"text": "EXPERIENCE", "x": 50, "y": 700, "fontSize": 14},
            {"text": "• Led migration of 12 services to Kubernetes", "x": 50, "y": 680, "fontSize": 10}
        ]}]}"#
        .as_bytes()
    }

    #[test]
    fn test_builder_options() {
        let builder = CvLayout::new().lenient().sequential();
        assert_eq!(builder.parse_options.error_mode, ErrorMode::Lenient);
        assert!(!builder.layout_options.parallel);
    }

    #[test]
    fn test_builder_with_vocabulary() {
        let vocabulary = Vocabulary {
            header_keywords: vec!["FORMATION".into()],
            skills: vec!["Elixir".into()],
        };
        let builder = CvLayout::new().with_vocabulary(vocabulary);
        assert_eq!(builder.layout_options.header_keywords, vec!["FORMATION".to_string()]);
        assert_eq!(builder.render_options.skill_vocabulary, vec!["Elixir".to_string()]);
    }

    #[test]
    fn test_builder_with_pages() {
        let builder = CvLayout::new().with_pages(PageSelection::Range(1..=2));
        assert_eq!(builder.parse_options.pages, PageSelection::Range(1..=2));
    }

    #[test]
    fn test_parse_bytes_empty_data() {
        assert!(matches!(parse_bytes(&[]), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_parse_bytes_unknown_magic() {
        let data = [0xFF, 0xFE, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05];
        assert!(parse_bytes(&data).is_err());
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_parse_bytes_broken_pdf() {
        assert!(parse_bytes(b"%PDF-1.7\nnot really a pdf").is_err());
    }

    #[test]
    fn test_structure_empty_document() {
        let resume = structure(&Document::new());
        assert!(resume.is_empty());
        assert!(resume.contact.is_empty());
        assert_eq!(resume.stats, ExtractionStats::default());
    }

    #[test]
    fn test_structure_collects_stats() {
        let doc = Document::from_fragments(vec![vec![
            frag("SKILLS", 50.0, 700.0, 14.0),
            frag("Python Docker and AWS", 50.0, 680.0, 10.0),
        ]]);
        let resume = structure(&doc);
        assert_eq!(resume.stats.page_count, 1);
        assert_eq!(resume.stats.line_count, 2);
        assert_eq!(resume.stats.header_count, 1);
        assert_eq!(resume.stats.text_count, 1);
        assert_eq!(resume.stats.skill_count, 3);
        assert_eq!(resume.skills.len(), 3);
    }

    #[test]
    fn test_structure_keeps_page_numbers() {
        let mut doc = Document::new();
        doc.add_page(Page::with_fragments(3, vec![frag("EDUCATION", 50.0, 700.0, 14.0)]));
        let resume = structure(&doc);
        assert_eq!(resume.blocks[0].page, 3);
    }

    #[test]
    fn test_builder_parse_bytes() {
        let result = CvLayout::new().sequential().parse_bytes(sample_dump()).unwrap();
        assert_eq!(result.contact().name.as_deref(), Some("Jane Doe"));
        assert_eq!(result.contact().email.as_deref(), Some("jane@example.com"));
        assert!(result.blocks().iter().any(|b| b.kind == BlockKind::Header));

        let markdown = result.to_markdown().unwrap();
        assert!(markdown.starts_with("# Jane Doe"));
        assert!(markdown.contains("## EXPERIENCE"));
        assert!(markdown.contains("- Led migration of 12 services to Kubernetes"));

        let text = result.to_text().unwrap();
        assert!(text.contains("EXPERIENCE"));

        let json = result.to_json(JsonFormat::Compact).unwrap();
        let back: StructuredResume = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result.resume);
    }

    #[test]
    fn test_file_facade() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample_dump()).unwrap();

        let doc = parse_file(file.path()).unwrap();
        assert_eq!(doc.fragment_count(), 4);

        let markdown = to_markdown(file.path()).unwrap();
        assert!(markdown.contains("## EXPERIENCE"));
        assert!(to_text(file.path()).unwrap().contains("Jane Doe"));
        assert!(to_json(file.path(), JsonFormat::Pretty)
            .unwrap()
            .contains("\"kind\": \"heading\""));
    }

    #[test]
    fn test_parse_missing_file() {
        assert!(matches!(parse_file("/nonexistent/resume.pdf"), Err(Error::Io(_))));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_parse_file_async() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample_dump()).unwrap();
        let doc = parse_file_async(file.path()).await.unwrap();
        assert_eq!(doc.page_count(), 1);
    }
}
