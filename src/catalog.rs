//! Catalog identifiers and addresses for the National Library of Norway.
//!
//! These helpers only build strings and read JSON that the caller has already
//! fetched; no network access happens here.
//!
//! # Example
//!
//! ```
//! use unalto::catalog::{extract_urn, Catalog};
//!
//! let urn = extract_urn("https://www.nb.no/items/URN:NBN:no-nb_digibok_2016040508078").unwrap();
//! let catalog = Catalog::default();
//! assert_eq!(
//!     catalog.alto_url(&urn, 7),
//!     "https://api.nb.no/catalog/v1/metadata/URN:NBN:no-nb_digibok_2016040508078/altos/URN:NBN:no-nb_digibok_2016040508078_0007"
//! );
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_API_BASE: &str = "https://api.nb.no/catalog/v1";
const DEFAULT_IMAGE_BASE: &str = "https://www.nb.no/services/image/resolver";
const DEFAULT_VIEWER_BASE: &str = "https://www.nb.no/items";

/// Base addresses of the catalog services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Catalog API root (metadata, ALTO, IIIF manifests)
    pub api_base: String,

    /// IIIF image resolver root
    pub image_base: String,

    /// Public item viewer root
    pub viewer_base: String,
}

impl Catalog {
    /// Create a catalog with the public default addresses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API root.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Set the image resolver root.
    pub fn with_image_base(mut self, base: impl Into<String>) -> Self {
        self.image_base = base.into();
        self
    }

    /// Set the viewer root.
    pub fn with_viewer_base(mut self, base: impl Into<String>) -> Self {
        self.viewer_base = base.into();
        self
    }

    /// ALTO XML address of a page.
    pub fn alto_url(&self, urn: &str, page: u32) -> String {
        format!(
            "{}/metadata/{}/altos/{}",
            self.api_base,
            urn,
            page_id(urn, page)
        )
    }

    /// Page image address at `percent` of full size.
    pub fn image_url(&self, urn: &str, page: u32, percent: u32) -> String {
        format!(
            "{}/{}/full/pct:{}/0/native.jpg",
            self.image_base,
            page_id(urn, page),
            percent
        )
    }

    /// IIIF manifest address of a document.
    pub fn manifest_url(&self, urn: &str) -> String {
        format!("{}/iiif/{}/manifest", self.api_base, urn)
    }

    /// Item metadata address (accepts a URN or a 32-hex item id).
    pub fn item_url(&self, id: &str) -> String {
        format!("{}/items/{}", self.api_base, id)
    }

    /// Public viewer address of a document.
    pub fn viewer_url(&self, urn: &str) -> String {
        format!("{}/{}", self.viewer_base, urn)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            viewer_base: DEFAULT_VIEWER_BASE.to_string(),
        }
    }
}

/// Identifier of one page: the URN followed by a four-digit page number.
pub fn page_id(urn: &str, page: u32) -> String {
    format!("{}_{:04}", urn, page)
}

/// Find a URN (`URN:NBN:...`) in free text or a link.
pub fn extract_urn(input: &str) -> Option<String> {
    let re = Regex::new(r"URN:NBN:[^\s/?]+").unwrap();
    re.find(input).map(|m| m.as_str().to_string())
}

/// Find a 32-hex item id in an `/items/{id}` link.
pub fn extract_item_id(input: &str) -> Option<String> {
    let re = Regex::new(r"/items/([a-f0-9]{32})").unwrap();
    re.captures(input).map(|caps| caps[1].to_string())
}

/// Find the document URN inside item metadata JSON.
///
/// Item records often mention page-level image URNs; the page and image
/// suffix (`_0001/full/...`) is stripped.
pub fn urn_from_item_json(item: &Value) -> Option<String> {
    let flat = item.to_string();
    let re = Regex::new(r#"URN:NBN:[^\s",]+"#).unwrap();
    let found = re.find(&flat)?.as_str();

    let suffix = Regex::new(r"_[^_]+/full/.*").unwrap();
    Some(suffix.replace(found, "").into_owned())
}

/// Page labels (`Side 1`, `Side 2`, ...) for the canvases of a IIIF manifest.
///
/// Returns an empty list when the manifest has no sequence or no canvases.
pub fn page_labels(manifest: &Value) -> Vec<String> {
    (1..=page_count(manifest))
        .map(|i| format!("Side {}", i))
        .collect()
}

/// Number of canvases in the first sequence of a IIIF manifest.
pub fn page_count(manifest: &Value) -> u32 {
    manifest
        .get("sequences")
        .and_then(|s| s.get(0))
        .and_then(|s| s.get("canvases"))
        .and_then(Value::as_array)
        .map(|canvases| canvases.len() as u32)
        .unwrap_or(0)
}

/// Title and year of an item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemMetadata {
    /// First `title` value found
    pub title: Option<String>,

    /// First four-digit `issued` value found
    pub year: Option<String>,
}

impl ItemMetadata {
    /// Pick title and issue year out of item metadata JSON.
    pub fn from_json(item: &Value) -> Self {
        let flat = item.to_string();
        let title = Regex::new(r#""title"\s*:\s*"([^"]+?)""#).unwrap();
        let issued = Regex::new(r#""issued"\s*:\s*"(\d{4})""#).unwrap();

        Self {
            title: title.captures(&flat).map(|c| c[1].to_string()),
            year: issued.captures(&flat).map(|c| c[1].to_string()),
        }
    }
}
