use crate::dom::dom_model::DomNode;

/// A node counts as visible when it is laid out and neither hidden by
/// `display` nor by `visibility`. Nodes without a computed style are
/// treated as not visible.
pub fn is_visible(node: &DomNode) -> bool {
    let Some(style) = &node.style else {
        return false;
    };

    style.display != "none"
        && style.visibility != "hidden"
        && style.visibility != "collapse"
        && node.has_layout_box
}
