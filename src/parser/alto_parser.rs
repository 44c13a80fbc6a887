//! ALTO document parser using roxmltree.

use std::io::Read;
use std::path::Path;

use roxmltree::{Document, Node};

use crate::error::{Error, Result};
use crate::model::{AltoSummary, OcrStep, PageLayout, Region, TextBlock, TextLine, Word};

use super::options::{ErrorMode, ParseOptions};
use super::{confidence, ocr_info, xml};

/// ALTO document parser.
///
/// The parser owns the raw XML text. Every extraction parses it afresh, so
/// results never share state and a parser can be reused freely.
pub struct AltoParser {
    xml: String,
    options: ParseOptions,
}

impl AltoParser {
    /// Create a parser over ALTO XML text.
    pub fn new(xml: impl Into<String>) -> Self {
        Self::with_options(xml, ParseOptions::default())
    }

    /// Create a parser over ALTO XML text with custom options.
    pub fn with_options(xml: impl Into<String>, options: ParseOptions) -> Self {
        Self {
            xml: xml.into(),
            options,
        }
    }

    /// Open an ALTO file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open an ALTO file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Create a parser from UTF-8 bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Create a parser from UTF-8 bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let text = std::str::from_utf8(data)?;
        Ok(Self::with_options(text, options))
    }

    /// Create a parser from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Create a parser from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// The raw XML text.
    pub fn xml(&self) -> &str {
        &self.xml
    }

    /// The parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Extract page dimensions, block/line/word geometry and full text.
    pub fn parse(&self) -> Result<PageLayout> {
        let doc = self.document()?;
        self.layout_of(&doc)
    }

    /// Extract OCR processing steps from the Description section.
    pub fn ocr_steps(&self) -> Result<Vec<OcrStep>> {
        let doc = self.document()?;
        Ok(ocr_info::extract_steps(&doc))
    }

    /// Formatted OCR processing lines, one per step with software info.
    pub fn ocr_processing_info(&self) -> Result<Vec<String>> {
        Ok(self
            .ocr_steps()?
            .iter()
            .map(|step| step.to_string())
            .collect())
    }

    /// Mean WC over all words, rounded to three decimals.
    pub fn average_word_confidence(&self) -> Result<Option<f64>> {
        let doc = self.document()?;
        Ok(confidence::average(&doc, xml::namespace(&doc)))
    }

    /// Run all extraction passes over a single parse of the document.
    pub fn summary(&self) -> Result<AltoSummary> {
        let doc = self.document()?;
        let layout = self.layout_of(&doc)?;

        Ok(AltoSummary {
            namespace: xml::namespace(&doc).to_string(),
            layout,
            ocr_steps: ocr_info::extract_steps(&doc),
            average_confidence: confidence::average(&doc, xml::namespace(&doc)),
        })
    }

    fn document(&self) -> Result<Document<'_>> {
        Ok(Document::parse_with_options(
            &self.xml,
            self.options.xml_options(),
        )?)
    }

    fn layout_of(&self, doc: &Document<'_>) -> Result<PageLayout> {
        match extract_layout(doc) {
            Err(e) if e.is_structural() && self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("{}; returning empty layout", e);
                Ok(PageLayout::empty())
            }
            result => result,
        }
    }
}

/// Walk Layout/Page and the three regions, numbering blocks as they appear.
fn extract_layout(doc: &Document<'_>) -> Result<PageLayout> {
    let ns = xml::namespace(doc);
    let root = doc.root_element();

    let layout = xml::child(root, ns, "Layout").ok_or(Error::MissingElement("Layout"))?;
    let page = xml::child(layout, ns, "Page").ok_or(Error::MissingElement("Page"))?;

    let width: u32 = xml::int_attribute(page, "WIDTH")?;
    let height: u32 = xml::int_attribute(page, "HEIGHT")?;

    let mut builder = LayoutBuilder::new(ns, width, height);
    for region in Region::ALL {
        match xml::child(page, ns, region.label()) {
            Some(area) => builder.visit_region(area, region)?,
            None => log::debug!("{} not present", region),
        }
    }

    Ok(builder.finish())
}

/// Accumulates records and text during one traversal.
struct LayoutBuilder<'ns> {
    ns: &'ns str,
    layout: PageLayout,
    text: String,
    next_block_id: u32,
}

impl<'ns> LayoutBuilder<'ns> {
    fn new(ns: &'ns str, width: u32, height: u32) -> Self {
        Self {
            ns,
            layout: PageLayout::new(width, height),
            text: String::new(),
            next_block_id: 1,
        }
    }

    fn visit_region(&mut self, area: Node<'_, '_>, region: Region) -> Result<()> {
        for block in xml::descendants(area, self.ns, "TextBlock") {
            self.visit_block(block, region)?;
        }
        Ok(())
    }

    fn visit_block(&mut self, block: Node<'_, '_>, region: Region) -> Result<()> {
        self.layout.blocks.push(TextBlock {
            rect: xml::rect(block)?,
            id: self.next_block_id,
            region,
        });
        self.next_block_id += 1;

        let mut line_texts = Vec::new();
        for line in xml::children(block, self.ns, "TextLine") {
            line_texts.push(self.visit_line(line)?);
        }

        self.text.push_str(&line_texts.join("\n"));
        self.text.push_str("\n\n");
        Ok(())
    }

    fn visit_line(&mut self, line: Node<'_, '_>) -> Result<String> {
        self.layout.lines.push(TextLine {
            rect: xml::rect(line)?,
        });

        let mut contents = Vec::new();
        for string in xml::children(line, self.ns, "String") {
            let word = Word {
                rect: xml::rect(string)?,
                content: string.attribute("CONTENT").unwrap_or_default().to_string(),
                confidence: string.attribute("WC").and_then(confidence::parse_wc),
            };
            contents.push(word.content.clone());
            self.layout.words.push(word);
        }

        Ok(contents.join(" "))
    }

    fn finish(mut self) -> PageLayout {
        self.layout.full_text = self.text.trim().to_string();
        log::debug!(
            "Extracted {} blocks, {} lines, {} words",
            self.layout.blocks.len(),
            self.layout.lines.len(),
            self.layout.words.len()
        );
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://www.loc.gov/standards/alto/ns-v2#";

    fn page(body: &str) -> String {
        format!(
            r#"<alto xmlns="{}"><Layout><Page WIDTH="1000" HEIGHT="1500">{}</Page></Layout></alto>"#,
            NS, body
        )
    }

    fn block(x: u32, lines: &[&[&str]]) -> String {
        let mut out = format!(
            r#"<TextBlock HPOS="{}" VPOS="0" WIDTH="10" HEIGHT="10">"#,
            x
        );
        for words in lines {
            out.push_str(r#"<TextLine HPOS="0" VPOS="0" WIDTH="10" HEIGHT="10">"#);
            for w in *words {
                out.push_str(&format!(
                    r#"<String HPOS="0" VPOS="0" WIDTH="5" HEIGHT="5" CONTENT="{}"/>"#,
                    w
                ));
            }
            out.push_str("</TextLine>");
        }
        out.push_str("</TextBlock>");
        out
    }

    #[test]
    fn test_block_and_full_text() {
        let xml = page(&format!(
            "<PrintSpace>{}{}</PrintSpace>",
            block(1, &[&["a", "b"], &["c"]]),
            block(2, &[&["d", "e"]])
        ));
        let layout = AltoParser::new(xml).parse().unwrap();

        assert_eq!(layout.full_text, "a b\nc\n\nd e");
        assert_eq!(layout.blocks.len(), 2);
        assert_eq!(layout.lines.len(), 3);
        assert_eq!(layout.words.len(), 5);
    }

    #[test]
    fn test_empty_contents_keep_spaces() {
        let xml = page(&format!(
            "<PrintSpace>{}</PrintSpace>",
            block(1, &[&["a", "", "", "b"]])
        ));
        let layout = AltoParser::new(xml).parse().unwrap();
        assert_eq!(layout.full_text, "a   b");
    }

    #[test]
    fn test_missing_content_defaults_to_empty() {
        let xml = page(
            r#"<PrintSpace><TextBlock HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1">
                <TextLine HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1">
                  <String HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1"/>
                  <String HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1" CONTENT="x"/>
                </TextLine></TextBlock></PrintSpace>"#,
        );
        let layout = AltoParser::new(xml).parse().unwrap();
        assert_eq!(layout.words[0].content, "");
        assert_eq!(layout.full_text, "x");
    }

    #[test]
    fn test_negative_position_keeps_page() {
        let xml = page(
            r#"<PrintSpace><TextBlock HPOS="0" VPOS="-2" WIDTH="10" HEIGHT="10">
                <TextLine HPOS="-1" VPOS="-2" WIDTH="10" HEIGHT="10">
                  <String HPOS="-1" VPOS="-2" WIDTH="5" HEIGHT="5" CONTENT="kant"/>
                </TextLine></TextBlock></PrintSpace>"#,
        );
        let layout = AltoParser::new(xml).parse().unwrap();

        assert_eq!(layout.blocks[0].rect.y, -2);
        assert_eq!(layout.words[0].rect.x, -1);
        assert_eq!(layout.full_text, "kant");
    }

    #[test]
    fn test_structural_error_modes() {
        let xml = format!(r#"<alto xmlns="{}"><Layout/></alto>"#, NS);

        let lenient = AltoParser::new(xml.clone()).parse().unwrap();
        assert_eq!(lenient, PageLayout::empty());

        let strict = AltoParser::with_options(xml, ParseOptions::new().strict()).parse();
        assert!(matches!(strict, Err(Error::MissingElement("Page"))));
    }

    #[test]
    fn test_malformed_xml_is_error() {
        let result = AltoParser::new("<alto><Layout></alto>").parse();
        assert!(matches!(result, Err(Error::Xml(_))));
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        let result = AltoParser::from_bytes(&[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_from_reader() {
        let xml = page("");
        let parser = AltoParser::from_reader(xml.as_bytes()).unwrap();
        assert_eq!(parser.parse().unwrap().dimensions(), Some((1000, 1500)));
    }

    #[test]
    fn test_word_confidence_recorded() {
        let xml = page(
            r#"<PrintSpace><TextBlock HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1">
                <TextLine HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1">
                  <String HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1" CONTENT="a" WC="0.75"/>
                  <String HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1" CONTENT="b" WC="bad"/>
                </TextLine></TextBlock></PrintSpace>"#,
        );
        let layout = AltoParser::new(xml).parse().unwrap();
        assert_eq!(layout.words[0].confidence, Some(0.75));
        assert_eq!(layout.words[1].confidence, None);
    }

    #[test]
    fn test_summary_runs_all_passes() {
        let xml = format!(
            r#"<alto xmlns="{ns}">
                <Description><OCRProcessing><ocrProcessingStep>
                  <processingSoftware><softwareName>ABBYY</softwareName></processingSoftware>
                </ocrProcessingStep></OCRProcessing></Description>
                <Layout><Page WIDTH="10" HEIGHT="20"><PrintSpace>
                  <TextBlock HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1">
                    <TextLine HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1">
                      <String HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1" CONTENT="hei" WC="0.5"/>
                    </TextLine>
                  </TextBlock>
                </PrintSpace></Page></Layout>
              </alto>"#,
            ns = NS
        );
        let summary = AltoParser::new(xml).summary().unwrap();

        assert_eq!(summary.namespace, NS);
        assert_eq!(summary.layout.full_text, "hei");
        assert_eq!(summary.ocr_info(), vec!["**OCR-prosessering**: ABBYY"]);
        assert_eq!(summary.average_confidence, Some(0.5));
    }
}
