//! Plain text rendering for ALTO pages and multi-page documents.

use rayon::prelude::*;

use crate::error::Result;
use crate::model::PageLayout;
use crate::parser::{AltoParser, ParseOptions};

/// Placeholder written for pages whose ALTO could not be obtained.
pub const UNAVAILABLE_MARKER: &str = "[ERROR: text unavailable]";

/// Text of one page in a multi-page document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageText {
    /// Transcribed text of the page (may be empty)
    Text(String),
    /// The page's ALTO could not be obtained
    Unavailable,
}

/// Convert a page layout to plain text.
pub fn to_text(layout: &PageLayout) -> String {
    layout.plain_text().to_string()
}

/// Join page texts into one document, numbering pages from 1.
///
/// Each page becomes `=== Page {n} ===` followed by its text and a blank
/// line. Pages with empty text are left out; unavailable pages get a marker.
pub fn assemble_document_text<'a, I>(pages: I) -> String
where
    I: IntoIterator<Item = &'a PageText>,
{
    let mut output = String::new();

    for (index, page) in pages.into_iter().enumerate() {
        let number = index + 1;
        match page {
            PageText::Text(text) if text.is_empty() => continue,
            PageText::Text(text) => {
                output.push_str(&format!("=== Page {} ===\n{}\n\n", number, text));
            }
            PageText::Unavailable => {
                output.push_str(&format!(
                    "=== Page {} ===\n{}\n\n",
                    number, UNAVAILABLE_MARKER
                ));
            }
        }
    }

    output.trim().to_string()
}

/// Extract the text of every page and assemble the document.
///
/// `None` entries stand for pages whose ALTO could not be fetched. Pages are
/// parsed in parallel when `options.parallel` is set; output order always
/// follows the input order. A malformed page aborts the whole assembly.
pub fn document_text<S>(pages: &[Option<S>], options: &ParseOptions) -> Result<String>
where
    S: AsRef<str> + Sync,
{
    let texts: Vec<PageText> = if options.parallel {
        pages
            .par_iter()
            .map(|page| page_text(page.as_ref(), options))
            .collect::<Result<_>>()?
    } else {
        pages
            .iter()
            .map(|page| page_text(page.as_ref(), options))
            .collect::<Result<_>>()?
    };

    log::debug!("Assembled text from {} pages", texts.len());
    Ok(assemble_document_text(&texts))
}

fn page_text<S: AsRef<str>>(xml: Option<&S>, options: &ParseOptions) -> Result<PageText> {
    match xml {
        Some(xml) => {
            let layout = AltoParser::with_options(xml.as_ref(), options.clone()).parse()?;
            Ok(PageText::Text(layout.full_text))
        }
        None => Ok(PageText::Unavailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alto(content: &str) -> String {
        format!(
            r#"<alto><Layout><Page WIDTH="10" HEIGHT="10"><PrintSpace>
                <TextBlock HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1">
                  <TextLine HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1">
                    <String HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1" CONTENT="{}"/>
                  </TextLine>
                </TextBlock>
              </PrintSpace></Page></Layout></alto>"#,
            content
        )
    }

    #[test]
    fn test_to_text() {
        let mut layout = PageLayout::new(1, 1);
        layout.full_text = "Hello, world!".to_string();
        assert_eq!(to_text(&layout), "Hello, world!");
    }

    #[test]
    fn test_assemble_document_text() {
        let pages = vec![
            PageText::Text("first".to_string()),
            PageText::Text(String::new()),
            PageText::Unavailable,
            PageText::Text("fourth".to_string()),
        ];
        let text = assemble_document_text(&pages);
        assert_eq!(
            text,
            "=== Page 1 ===\nfirst\n\n=== Page 3 ===\n[ERROR: text unavailable]\n\n=== Page 4 ===\nfourth"
        );
    }

    #[test]
    fn test_assemble_empty_document() {
        let pages: Vec<PageText> = Vec::new();
        assert_eq!(assemble_document_text(&pages), "");
    }

    #[test]
    fn test_document_text_parallel_matches_sequential() {
        let pages = vec![Some(alto("en")), None, Some("<alto/>".to_string()), Some(alto("fire"))];

        let parallel = document_text(&pages, &ParseOptions::new()).unwrap();
        let sequential = document_text(&pages, &ParseOptions::new().sequential()).unwrap();

        assert_eq!(parallel, sequential);
        assert_eq!(
            parallel,
            "=== Page 1 ===\nen\n\n=== Page 2 ===\n[ERROR: text unavailable]\n\n=== Page 4 ===\nfire"
        );
    }

    #[test]
    fn test_document_text_propagates_attribute_errors() {
        let bad = r#"<alto><Layout><Page WIDTH="x" HEIGHT="1"/></Layout></alto>"#.to_string();
        let pages = vec![Some(alto("ok")), Some(bad)];
        assert!(document_text(&pages, &ParseOptions::new()).is_err());
    }
}
