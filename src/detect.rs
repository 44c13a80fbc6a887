//! ALTO format detection.

use crate::error::{Error, Result};
use crate::parser::ParseOptions;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// ALTO format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AltoFormat {
    /// Namespace URI of the root element (empty for unqualified documents)
    pub namespace: String,
    /// Schema major version from the namespace URI (e.g., "2" for `ns-v2#`)
    pub version: Option<String>,
}

impl std::fmt::Display for AltoFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.version {
            Some(ref v) => write!(f, "ALTO v{}", v),
            None => write!(f, "ALTO"),
        }
    }
}

/// Local name of the ALTO root element.
const ROOT_ELEMENT: &str = "alto";

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"ns-v(\d+)").expect("valid regex"))
}

/// Detect ALTO format from a file path.
///
/// # Example
/// ```no_run
/// use unalto::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("page_0001.xml").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<AltoFormat> {
    let data = std::fs::read(path)?;
    detect_format_from_bytes(&data)
}

/// Detect ALTO format from bytes.
///
/// # Returns
/// * `Ok(AltoFormat)` if the data is well-formed XML with an `alto` root
/// * `Err(Error::UnknownFormat)` if the root element is something else
pub fn detect_format_from_bytes(data: &[u8]) -> Result<AltoFormat> {
    let text = std::str::from_utf8(data)?;
    detect_format_from_str(text)
}

/// Detect ALTO format from a string.
pub fn detect_format_from_str(xml: &str) -> Result<AltoFormat> {
    // Same XML settings as the extractor, so anything it parses is detected.
    let options = ParseOptions::default().xml_options();
    let doc = roxmltree::Document::parse_with_options(xml, options)?;
    let root = doc.root_element();

    if root.tag_name().name() != ROOT_ELEMENT {
        return Err(Error::UnknownFormat);
    }

    let namespace = root.tag_name().namespace().unwrap_or_default().to_string();
    let version = version_from_namespace(&namespace);

    Ok(AltoFormat { namespace, version })
}

/// Extract the schema major version from an ALTO namespace URI.
pub fn version_from_namespace(namespace: &str) -> Option<String> {
    version_pattern()
        .captures(namespace)
        .map(|caps| caps[1].to_string())
}

/// Check if a file is an ALTO document.
pub fn is_alto<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes hold an ALTO document.
pub fn is_alto_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
