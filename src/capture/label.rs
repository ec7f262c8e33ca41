use crate::dom::dom_model::DomNode;

pub const MAX_LABEL_CHARS: usize = 50;
pub const ELLIPSIS: &str = "...";

/// First non-empty candidate among text content, placeholder, aria-label and
/// name, with whitespace runs collapsed. Not truncated.
pub fn raw_label(node: &DomNode) -> Option<String> {
    [
        Some(node.text.as_str()),
        node.attr("placeholder"),
        node.attr("aria-label"),
        node.attr("name"),
    ]
    .into_iter()
    .flatten()
    .map(collapse_whitespace)
    .find(|candidate| !candidate.is_empty())
}

/// Human-readable label for a node, or `None` when the node should be skipped.
pub fn describe(node: &DomNode) -> Option<String> {
    raw_label(node).map(|label| truncate_label(&label))
}

/// Label phrased with a tag-derived role word. Cosmetic only.
pub fn readable_description(node: &DomNode) -> Option<String> {
    let label = describe(node)?;
    let tag = node.tag.to_ascii_lowercase();

    match tag.as_str() {
        "input" | "textarea" => Some(format!("Input with label \"{label}\"")),
        "button" => Some(format!("Button with text \"{label}\"")),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "label" | "span" | "div" | "a" => {
            Some(format!("{} with text \"{label}\"", capitalize(&tag)))
        }
        _ => None,
    }
}

pub fn truncate_label(label: &str) -> String {
    if label.chars().count() > MAX_LABEL_CHARS {
        let head: String = label.chars().take(MAX_LABEL_CHARS).collect();
        format!("{head}{ELLIPSIS}")
    } else {
        label.to_string()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
