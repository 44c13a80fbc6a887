//! Word confidence (WC) aggregation.

use roxmltree::Document;

use super::xml;

/// Parse a WC attribute value, rejecting malformed and non-finite numbers.
pub(crate) fn parse_wc(raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            log::trace!("Skipping malformed WC value {:?}", raw);
            None
        }
    }
}

/// Mean WC of every `String` element in namespace `ns`, at any depth.
///
/// Returns `None` when no element carries a usable WC value.
pub(crate) fn average(doc: &Document<'_>, ns: &str) -> Option<f64> {
    let values: Vec<f64> = doc
        .descendants()
        .filter(|n| xml::is_element(*n, ns, "String"))
        .filter_map(|n| n.attribute("WC"))
        .filter_map(parse_wc)
        .collect();

    if values.is_empty() {
        return None;
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some(round3(mean))
}

/// Round to three decimals, exact halves to even (0.8125 becomes 0.812).
fn round3(value: f64) -> f64 {
    (value * 1000.0).round_ties_even() / 1000.0
}
