use tracing::trace;

use crate::capture::capture_model::{CaptureSnapshot, ScreenElement};
use crate::capture::label::{raw_label, readable_description};
use crate::capture::selector::synthesize;
use crate::capture::visibility::is_visible;
use crate::dom::dom_model::{Document, DomNode};

/// Tags scanned on each pass, in scan order.
pub const SCANNED_TAGS: &[&str] = &[
    "input", "button", "textarea", "select", "label", "a", "span", "div", "h1", "h2", "h3", "h4",
    "h5", "h6",
];

/// Visible nodes of the scanned tags, grouped by tag in [`SCANNED_TAGS`]
/// order and in document order within a tag.
fn scanned_nodes(doc: &Document) -> impl Iterator<Item = &DomNode> {
    SCANNED_TAGS
        .iter()
        .flat_map(move |tag| doc.nodes_with_tag(*tag))
        .map(|(_, node)| node)
        .filter(|node| is_visible(node))
}

pub fn capture_element(node: &DomNode) -> Option<ScreenElement> {
    let label = raw_label(node)?;
    let selector = synthesize(node)?;

    Some(ScreenElement {
        label: label.to_lowercase(),
        tag: node.tag.to_ascii_lowercase(),
        selector: selector.value,
    })
}

/// Full-document scan. Deterministic for an unchanged document.
pub fn scan(doc: &Document) -> CaptureSnapshot {
    let elements: Vec<ScreenElement> = scanned_nodes(doc).filter_map(capture_element).collect();
    trace!(count = elements.len(), "scanned document");
    CaptureSnapshot::new(elements)
}

/// Role-phrased descriptions of every captured node, in scan order.
pub fn describe_screen(doc: &Document) -> Vec<String> {
    scanned_nodes(doc).filter_map(readable_description).collect()
}
