//! OCR processing metadata from `Description/OCRProcessing`.
//!
//! Producers disagree on prefixes and on step element names
//! (`ocrProcessingStep`, `preProcessingStep`, ...), so this pass matches
//! element names by suffix and ignores namespaces.

use roxmltree::{Document, Node};

use crate::model::{OcrStep, ProcessingSoftware, StepKind};

use super::xml;

/// Collect processing steps that name their software, in document order.
pub(crate) fn extract_steps(doc: &Document<'_>) -> Vec<OcrStep> {
    let root = doc.root_element();

    let Some(description) =
        xml::elements(root).find(|n| xml::local_name(*n).ends_with("Description"))
    else {
        return Vec::new();
    };

    let mut steps = Vec::new();
    for processing in
        xml::elements(description).filter(|n| xml::local_name(*n).ends_with("OCRProcessing"))
    {
        for step in xml::elements(processing).filter(|n| is_step(*n)) {
            let kind = StepKind::from_tag(xml::local_name(step));

            // Only the first processingSoftware of a step counts.
            let software = xml::elements(step)
                .find(|n| xml::local_name(*n).ends_with("processingSoftware"))
                .map(read_software);

            match software {
                Some(software) => steps.push(OcrStep::new(kind, software)),
                None => log::debug!("{} has no processingSoftware", xml::local_name(step)),
            }
        }
    }

    steps
}

fn is_step(node: Node<'_, '_>) -> bool {
    xml::local_name(node).to_lowercase().ends_with("step")
}

fn read_software(node: Node<'_, '_>) -> ProcessingSoftware {
    let mut software = ProcessingSoftware::default();
    for element in xml::elements(node) {
        match xml::local_name(element) {
            "softwareName" => software.name = xml::text(element),
            "softwareCreator" => software.creator = xml::text(element),
            "softwareVersion" => software.version = xml::text(element),
            _ => {}
        }
    }
    software
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(xml: &str) -> Vec<String> {
        let doc = Document::parse(xml).unwrap();
        extract_steps(&doc).iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ocr_step_formatting() {
        let xml = r#"<alto xmlns="http://www.loc.gov/standards/alto/ns-v2#">
            <Description><OCRProcessing ID="OCR_0">
              <ocrProcessingStep>
                <processingSoftware>
                  <softwareCreator> NB </softwareCreator>
                  <softwareName>ABBYY</softwareName>
                  <softwareVersion>12</softwareVersion>
                </processingSoftware>
              </ocrProcessingStep>
            </OCRProcessing></Description>
          </alto>"#;
        assert_eq!(steps(xml), vec!["**OCR-prosessering**: ABBYY versjon 12 (NB)"]);
    }

    #[test]
    fn test_preprocessing_and_order_across_blocks() {
        let xml = r#"<alto>
            <Description>
              <OCRProcessing>
                <preProcessingStep><processingSoftware><softwareName>Deskew</softwareName></processingSoftware></preProcessingStep>
              </OCRProcessing>
              <OCRProcessing>
                <ocrProcessingStep><processingSoftware><softwareName>Finereader</softwareName></processingSoftware></ocrProcessingStep>
              </OCRProcessing>
            </Description>
          </alto>"#;
        assert_eq!(
            steps(xml),
            vec![
                "**Preprosessering:**: Deskew",
                "**OCR-prosessering**: Finereader"
            ]
        );
    }

    #[test]
    fn test_non_step_children_ignored() {
        let xml = r#"<alto><Description><OCRProcessing>
              <processingStepSettings><processingSoftware><softwareName>X</softwareName></processingSoftware></processingStepSettings>
              <ocrProcessingSTEP><processingSoftware/></ocrProcessingSTEP>
            </OCRProcessing></Description></alto>"#;
        assert_eq!(steps(xml), vec!["**OCR-prosessering**: (ukjent)"]);
    }

    #[test]
    fn test_only_first_software_counts() {
        let xml = r#"<alto><Description><OCRProcessing><ocrProcessingStep>
              <processingDateTime>2020-01-01</processingDateTime>
              <processingSoftware><softwareName>First</softwareName></processingSoftware>
              <processingSoftware><softwareName>Second</softwareName></processingSoftware>
            </ocrProcessingStep></OCRProcessing></Description></alto>"#;
        assert_eq!(steps(xml), vec!["**OCR-prosessering**: First"]);
    }

    #[test]
    fn test_step_without_software_contributes_nothing() {
        let xml = r#"<alto><Description><OCRProcessing>
              <preProcessingStep><processingStepDescription>crop</processingStepDescription></preProcessingStep>
            </OCRProcessing></Description></alto>"#;
        assert!(steps(xml).is_empty());
    }

    #[test]
    fn test_missing_description() {
        assert!(steps("<alto><Layout/></alto>").is_empty());
    }

    #[test]
    fn test_prefixed_elements() {
        let xml = r#"<a:alto xmlns:a="urn:alto"><a:Description><a:OCRProcessing>
              <a:ocrProcessingStep><a:processingSoftware>
                <a:softwareName>Tesseract</a:softwareName><a:softwareVersion>5</a:softwareVersion>
              </a:processingSoftware></a:ocrProcessingStep>
            </a:OCRProcessing></a:Description></a:alto>"#;
        assert_eq!(steps(xml), vec!["**OCR-prosessering**: Tesseract versjon 5"]);
    }
}
