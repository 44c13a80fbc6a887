//! Page-level types.

use super::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Page area that holds text blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Main text area
    PrintSpace,
    /// Running heads and other content above the print space
    TopMargin,
    /// Footers, page numbers and other content below the print space
    BottomMargin,
}

impl Region {
    /// Regions in the order blocks are numbered.
    pub const ALL: [Region; 3] = [Region::PrintSpace, Region::TopMargin, Region::BottomMargin];

    /// Element name and label of the region.
    pub fn label(&self) -> &'static str {
        match self {
            Region::PrintSpace => "PrintSpace",
            Region::TopMargin => "TopMargin",
            Region::BottomMargin => "BottomMargin",
        }
    }

    /// Whether the region is one of the page margins.
    pub fn is_margin(&self) -> bool {
        !matches!(self, Region::PrintSpace)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A text block with its document-wide number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Block geometry
    pub rect: Rect,

    /// Sequential number, starting at 1
    pub id: u32,

    /// Region the block was found in
    pub region: Region,
}

/// A text line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLine {
    /// Line geometry
    pub rect: Rect,
}

/// A word (ALTO `String`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Word geometry
    pub rect: Rect,

    /// CONTENT attribute, empty when absent
    pub content: String,

    /// WC attribute in [0, 1], if present and well-formed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Which of the three geometric sequences to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementKind {
    /// Text blocks (numbered, region-coloured)
    #[default]
    Blocks,
    /// Text lines
    Lines,
    /// Words
    Words,
}

/// One geometric record handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// A text block
    Block(TextBlock),
    /// A text line
    Line(TextLine),
    /// A word
    Word(Word),
}

impl Element {
    /// Geometry of the record.
    pub fn rect(&self) -> Rect {
        match self {
            Element::Block(b) => b.rect,
            Element::Line(l) => l.rect,
            Element::Word(w) => w.rect,
        }
    }

    /// Block number; lines and words are not numbered.
    pub fn number(&self) -> Option<u32> {
        match self {
            Element::Block(b) => Some(b.id),
            _ => None,
        }
    }

    /// Region label; only blocks carry one.
    pub fn region(&self) -> Option<Region> {
        match self {
            Element::Block(b) => Some(b.region),
            _ => None,
        }
    }
}

/// Geometry and text extracted from a single ALTO page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page WIDTH, absent when extraction failed
    pub width: Option<u32>,

    /// Page HEIGHT, absent when extraction failed
    pub height: Option<u32>,

    /// Text blocks in numbering order
    pub blocks: Vec<TextBlock>,

    /// Text lines in traversal order
    pub lines: Vec<TextLine>,

    /// Words in traversal order
    pub words: Vec<Word>,

    /// Transcribed text of the page
    pub full_text: String,
}

impl PageLayout {
    /// Create a layout for a page with the given dimensions and no content.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// The result of a failed extraction: no dimensions, no records, no text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Page dimensions, if the page was found.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }

    /// Check if no geometry or text was extracted.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
            && self.lines.is_empty()
            && self.words.is_empty()
            && self.full_text.is_empty()
    }

    /// Get the transcribed text.
    pub fn plain_text(&self) -> &str {
        &self.full_text
    }

    /// Blocks found in a given region.
    pub fn blocks_in(&self, region: Region) -> impl Iterator<Item = &TextBlock> {
        self.blocks.iter().filter(move |b| b.region == region)
    }

    /// One of the three geometric sequences as uniform records.
    pub fn elements(&self, kind: ElementKind) -> Vec<Element> {
        match kind {
            ElementKind::Blocks => self.blocks.iter().cloned().map(Element::Block).collect(),
            ElementKind::Lines => self.lines.iter().cloned().map(Element::Line).collect(),
            ElementKind::Words => self.words.iter().cloned().map(Element::Word).collect(),
        }
    }
}
