//! Document-level types.

use super::{OcrStep, PageLayout};
use serde::{Deserialize, Serialize};

/// Everything extracted from one ALTO document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltoSummary {
    /// Namespace URI of the root element, empty when unqualified
    pub namespace: String,

    /// Page geometry and text
    pub layout: PageLayout,

    /// OCR processing steps from the Description section
    pub ocr_steps: Vec<OcrStep>,

    /// Mean word confidence rounded to three decimals
    pub average_confidence: Option<f64>,
}

impl AltoSummary {
    /// Formatted OCR metadata lines, one per step.
    pub fn ocr_info(&self) -> Vec<String> {
        self.ocr_steps.iter().map(|s| s.to_string()).collect()
    }

    /// Number of words whose CONTENT is not blank.
    pub fn word_count(&self) -> usize {
        self.layout
            .words
            .iter()
            .filter(|w| !w.content.trim().is_empty())
            .count()
    }
}
