//! Element lookup helpers over a `roxmltree` document.
//!
//! ALTO lookups match an element's local name within the single namespace
//! discovered from the root element. Unqualified documents use the empty
//! namespace.

use std::str::FromStr;

use roxmltree::Node;

use crate::error::{Error, Result};
use crate::model::Rect;

/// Namespace URI of the root element, or `""` when unqualified.
pub(crate) fn namespace<'a>(doc: &'a roxmltree::Document<'_>) -> &'a str {
    doc.root_element().tag_name().namespace().unwrap_or_default()
}

/// Local name of an element.
pub(crate) fn local_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check that a node is the element `name` in namespace `ns`.
pub(crate) fn is_element(node: Node<'_, '_>, ns: &str, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace().unwrap_or_default() == ns
}

/// Element children of a node, in document order.
pub(crate) fn elements<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

/// First direct child named `name`.
pub(crate) fn child<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_element(*n, ns, name))
}

/// All direct children named `name`, in document order.
pub(crate) fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    ns: &'a str,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| is_element(*n, ns, name))
}

/// All descendants named `name` at any depth, in document order.
pub(crate) fn descendants<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    ns: &'a str,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.descendants()
        .skip(1)
        .filter(move |n| is_element(*n, ns, name))
}

/// Trimmed text content of an element, `None` when blank.
pub(crate) fn text(node: Node<'_, '_>) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Required integer attribute.
///
/// The target type decides the accepted range: page sizes are unsigned,
/// positions may be negative.
pub(crate) fn int_attribute<T: FromStr>(node: Node<'_, '_>, attribute: &'static str) -> Result<T> {
    let raw = node
        .attribute(attribute)
        .ok_or_else(|| Error::MissingAttribute {
            element: local_name(node).to_string(),
            attribute,
        })?;

    raw.trim().parse().map_err(|_| Error::InvalidAttribute {
        element: local_name(node).to_string(),
        attribute,
        value: raw.to_string(),
    })
}

/// HPOS/VPOS/WIDTH/HEIGHT of an element.
pub(crate) fn rect(node: Node<'_, '_>) -> Result<Rect> {
    Ok(Rect::new(
        int_attribute(node, "HPOS")?,
        int_attribute(node, "VPOS")?,
        int_attribute(node, "WIDTH")?,
        int_attribute(node, "HEIGHT")?,
    ))
}
