//! Document model types for ALTO content representation.
//!
//! This module defines the records that bridge ALTO parsing and rendering:
//! page geometry, the block/line/word hierarchy flattened into ordered
//! sequences, transcribed text and OCR processing metadata.

mod document;
mod geometry;
mod metadata;
mod page;

pub use document::AltoSummary;
pub use geometry::Rect;
pub use metadata::{OcrStep, ProcessingSoftware, StepKind};
pub use page::{Element, ElementKind, PageLayout, Region, TextBlock, TextLine, Word};
