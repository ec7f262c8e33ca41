use std::fmt;

use crate::capture::label::raw_label;
use crate::dom::dom_model::DomNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    Placeholder,
    AriaLabel,
    Name,
    /// `tag:contains("text")`. Not a standard CSS selector: most query
    /// engines reject it. It only carries the label for fuzzy matching.
    TextContains,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub kind: SelectorKind,
    pub value: String,
}

impl Selector {
    /// Whether a real CSS query engine can be expected to accept this selector.
    pub fn is_resolvable(&self) -> bool {
        self.kind != SelectorKind::TextContains
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Best-effort locator for a node. Neither unique nor stable across
/// mutations. Returns `None` when the node has no label.
pub fn synthesize(node: &DomNode) -> Option<Selector> {
    raw_label(node)?;

    let tag = node.tag.to_ascii_lowercase();

    let attribute = [
        ("placeholder", SelectorKind::Placeholder),
        ("aria-label", SelectorKind::AriaLabel),
        ("name", SelectorKind::Name),
    ]
    .into_iter()
    .find_map(|(attr, kind)| node.attr(attr).map(|v| (attr, kind, v)));

    if let Some((attr, kind, value)) = attribute {
        return Some(Selector {
            kind,
            value: format!("{tag}[{attr}=\"{}\"]", escape_quotes(value)),
        });
    }

    let text = node.text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return None;
    }

    Some(Selector {
        kind: SelectorKind::TextContains,
        value: format!("{tag}:contains(\"{}\")", escape_quotes(&text)),
    })
}

/// True when `selector` is the text-containment fallback.
pub fn is_text_fallback(selector: &str) -> bool {
    selector.contains(":contains(")
}

fn escape_quotes(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
