//! OCR processing metadata from the ALTO `Description` section.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of processing step, derived from the step element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Element name contains "ocr" (e.g. `ocrProcessingStep`)
    Ocr,
    /// Any other step (pre- or post-processing)
    Preprocessing,
}

impl StepKind {
    /// Classify a step by its element name.
    pub fn from_tag(tag: &str) -> Self {
        if tag.to_lowercase().contains("ocr") {
            StepKind::Ocr
        } else {
            StepKind::Preprocessing
        }
    }

    /// Display label used in formatted metadata lines.
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Ocr => "OCR-prosessering",
            StepKind::Preprocessing => "Preprosessering:",
        }
    }
}

/// Software that performed a processing step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessingSoftware {
    /// softwareName
    pub name: Option<String>,

    /// softwareCreator
    pub creator: Option<String>,

    /// softwareVersion
    pub version: Option<String>,
}

/// A processing step with its software description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrStep {
    /// Step classification
    pub kind: StepKind,

    /// Software used in the step
    pub software: ProcessingSoftware,
}

impl OcrStep {
    /// Create a step.
    pub fn new(kind: StepKind, software: ProcessingSoftware) -> Self {
        Self { kind, software }
    }
}

impl fmt::Display for OcrStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.software.name.as_deref().unwrap_or("(ukjent)");
        write!(f, "**{}**: {}", self.kind.label(), name)?;
        if let Some(ref version) = self.software.version {
            write!(f, " versjon {}", version)?;
        }
        if let Some(ref creator) = self.software.creator {
            write!(f, " ({})", creator)?;
        }
        Ok(())
    }
}
