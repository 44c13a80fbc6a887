//! # unalto
//!
//! ALTO XML layout extraction library for Rust.
//!
//! This library reads ALTO ("Analyzed Layout and Text Object") documents,
//! the OCR layout format used by digital libraries for scanned pages, and
//! projects them into flat records a renderer can draw: page dimensions,
//! numbered text blocks with their page region, text lines, words, the
//! transcribed text, OCR processing metadata and average word confidence.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unalto::{parse_file, render};
//!
//! fn main() -> unalto::Result<()> {
//!     let layout = parse_file("page_0001.xml")?;
//!
//!     for block in &layout.blocks {
//!         println!("#{} {} {:?}", block.id, block.region, block.rect);
//!     }
//!     println!("{}", render::to_text(&layout));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Namespace-aware**: ALTO v2-v4 namespaces and unqualified documents
//! - **Soft structural failures**: missing Layout/Page yields an empty layout
//! - **OCR metadata**: processing steps and software from `Description`
//! - **Overlays**: scaled bounding boxes and SVG output for page images
//! - **Whole documents**: multi-page text assembly, parallel with Rayon

pub mod catalog;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_alto, AltoFormat};
pub use error::{Error, Result};
pub use model::{
    AltoSummary, Element, ElementKind, OcrStep, PageLayout, ProcessingSoftware, Rect, Region,
    StepKind, TextBlock, TextLine, Word,
};
pub use parser::{AltoParser, ErrorMode, ParseOptions};
pub use render::{JsonFormat, OverlayOptions, OverlayShape, PageText};

use std::io::Read;
use std::path::Path;

/// Parse ALTO XML text into a page layout.
///
/// # Example
///
/// ```
/// let xml = r#"<alto><Layout><Page WIDTH="100" HEIGHT="200"/></Layout></alto>"#;
/// let layout = unalto::parse_str(xml).unwrap();
/// assert_eq!(layout.dimensions(), Some((100, 200)));
/// ```
pub fn parse_str(xml: &str) -> Result<PageLayout> {
    AltoParser::new(xml).parse()
}

/// Parse ALTO XML text with custom options.
pub fn parse_str_with_options(xml: &str, options: ParseOptions) -> Result<PageLayout> {
    AltoParser::with_options(xml, options).parse()
}

/// Parse an ALTO file.
///
/// # Example
///
/// ```no_run
/// use unalto::parse_file;
///
/// let layout = parse_file("page_0001.xml").unwrap();
/// println!("Blocks: {}", layout.blocks.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<PageLayout> {
    AltoParser::open(path)?.parse()
}

/// Parse an ALTO file with custom options.
///
/// # Example
///
/// ```no_run
/// use unalto::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().strict();
/// let layout = parse_file_with_options("page_0001.xml", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<PageLayout> {
    AltoParser::open_with_options(path, options)?.parse()
}

/// Parse ALTO from UTF-8 bytes.
pub fn parse_bytes(data: &[u8]) -> Result<PageLayout> {
    AltoParser::from_bytes(data)?.parse()
}

/// Parse ALTO from UTF-8 bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<PageLayout> {
    AltoParser::from_bytes_with_options(data, options)?.parse()
}

/// Parse ALTO from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<PageLayout> {
    AltoParser::from_reader(reader)?.parse()
}

/// Extract the transcribed text of an ALTO file.
///
/// # Example
///
/// ```no_run
/// let text = unalto::extract_text("page_0001.xml").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let layout = parse_file(path)?;
    Ok(layout.full_text)
}

/// Formatted OCR processing lines from ALTO XML text.
///
/// # Example
///
/// ```
/// let xml = r#"<alto><Description><OCRProcessing><ocrProcessingStep>
///   <processingSoftware>
///     <softwareCreator>NB</softwareCreator>
///     <softwareName>ABBYY</softwareName>
///     <softwareVersion>12</softwareVersion>
///   </processingSoftware>
/// </ocrProcessingStep></OCRProcessing></Description></alto>"#;
///
/// let info = unalto::extract_ocr_info(xml).unwrap();
/// assert_eq!(info, vec!["**OCR-prosessering**: ABBYY versjon 12 (NB)"]);
/// ```
pub fn extract_ocr_info(xml: &str) -> Result<Vec<String>> {
    AltoParser::new(xml).ocr_processing_info()
}

/// Mean word confidence of ALTO XML text, rounded to three decimals.
///
/// # Example
///
/// ```
/// let xml = r#"<alto><String WC="0.9"/><String WC="0.8"/><String WC="1.0"/></alto>"#;
/// assert_eq!(unalto::extract_average_confidence(xml).unwrap(), Some(0.9));
/// ```
pub fn extract_average_confidence(xml: &str) -> Result<Option<f64>> {
    AltoParser::new(xml).average_word_confidence()
}

/// Run every extraction pass over an ALTO file.
pub fn summarize_file<P: AsRef<Path>>(path: P) -> Result<AltoSummary> {
    AltoParser::open(path)?.summary()
}

/// Convert an ALTO file to JSON.
///
/// # Example
///
/// ```no_run
/// use unalto::{to_json, JsonFormat};
///
/// let json = to_json("page_0001.xml", JsonFormat::Pretty).unwrap();
/// std::fs::write("page_0001.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let summary = summarize_file(path)?;
    render::to_json(&summary, format)
}

/// Builder for parsing and rendering ALTO documents.
///
/// # Example
///
/// ```no_run
/// use unalto::{ElementKind, Unalto};
///
/// let svg = Unalto::new()
///     .strict()
///     .with_overlay_kind(ElementKind::Words)
///     .parse("page_0001.xml")?
///     .to_svg((1200, 1800))?;
/// # Ok::<(), unalto::Error>(())
/// ```
pub struct Unalto {
    parse_options: ParseOptions,
    overlay_options: OverlayOptions,
}

impl Unalto {
    /// Create a new Unalto builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            overlay_options: OverlayOptions::default(),
        }
    }

    /// Report missing Layout/Page elements as errors.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Set which records overlays draw.
    pub fn with_overlay_kind(mut self, kind: ElementKind) -> Self {
        self.overlay_options = self.overlay_options.with_kind(kind);
        self
    }

    /// Draw block numbers on overlays.
    pub fn with_numbers(mut self) -> Self {
        self.overlay_options = self.overlay_options.with_numbers(true);
        self
    }

    /// Set the image drawn beneath SVG overlays.
    pub fn with_image_href(mut self, href: impl Into<String>) -> Self {
        self.overlay_options = self.overlay_options.with_image_href(href);
        self
    }

    /// Parse an ALTO file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UnaltoResult> {
        let parser = AltoParser::open_with_options(path, self.parse_options)?;
        Ok(UnaltoResult {
            summary: parser.summary()?,
            overlay_options: self.overlay_options,
        })
    }

    /// Parse ALTO from UTF-8 bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UnaltoResult> {
        let parser = AltoParser::from_bytes_with_options(data, self.parse_options)?;
        Ok(UnaltoResult {
            summary: parser.summary()?,
            overlay_options: self.overlay_options,
        })
    }
}

impl Default for Unalto {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing an ALTO document.
pub struct UnaltoResult {
    /// Everything extracted from the document
    pub summary: AltoSummary,
    /// Overlay options to use
    overlay_options: OverlayOptions,
}

impl UnaltoResult {
    /// Get the page layout.
    pub fn layout(&self) -> &PageLayout {
        &self.summary.layout
    }

    /// Get the transcribed text.
    pub fn plain_text(&self) -> &str {
        self.summary.layout.plain_text()
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.summary, format)
    }

    /// Overlay shapes scaled to an image of `image_size`.
    pub fn overlay(&self, image_size: (u32, u32)) -> Result<Vec<OverlayShape>> {
        render::overlay_shapes(&self.summary.layout, image_size, &self.overlay_options)
    }

    /// SVG overlay for an image of `image_size`.
    pub fn to_svg(&self, image_size: (u32, u32)) -> Result<String> {
        render::render_overlay_svg(&self.summary.layout, image_size, &self.overlay_options)
    }
}
