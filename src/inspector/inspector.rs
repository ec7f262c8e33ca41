use serde::Serialize;

use tracing::debug;

use crate::dom::dom_model::{Document, NodeId};

pub const HIGHLIGHT_CLASS: &str = "genai-highlight";
pub const SELECTED_CLASS: &str = "genai-selected";

/// A click selects the nearest ancestor-or-self with one of these tags.
pub const SELECTABLE_TAGS: &[&str] = &["img", "div", "p", "span", "a"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectorState {
    pub is_active: bool,
    pub has_content: bool,
}

/// Point-and-click element picker.
///
/// Pointer events are ignored while inactive. Highlight state is kept here
/// rather than written into the page, see [`ElementInspector::classes_for`].
#[derive(Debug, Default, Clone)]
pub struct ElementInspector {
    active: bool,
    selected: Vec<NodeId>,
    highlighted: Option<NodeId>,
}

impl ElementInspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> InspectorState {
        InspectorState {
            is_active: self.active,
            has_content: !self.selected.is_empty(),
        }
    }

    pub fn toggle(&mut self) -> InspectorState {
        if self.active {
            self.stop();
        } else {
            self.start();
        }
        self.state()
    }

    pub fn start(&mut self) {
        self.active = true;
        debug!("inspector started");
    }

    /// Stop listening. The hover highlight goes, the selection stays.
    pub fn stop(&mut self) {
        self.active = false;
        self.highlighted = None;
        debug!("inspector stopped");
    }

    pub fn mouse_over(&mut self, target: NodeId) {
        if !self.active {
            return;
        }
        self.highlighted = Some(target);
    }

    pub fn mouse_out(&mut self) {
        if !self.active {
            return;
        }
        self.highlighted = None;
    }

    /// Toggle selection of the nearest selectable ancestor-or-self of
    /// `target`. Returns the aggregated outer HTML of the selection when it
    /// changed.
    pub fn click(&mut self, doc: &Document, target: NodeId) -> Option<String> {
        if !self.active {
            return None;
        }

        let element = closest_selectable(doc, target)?;

        if let Some(pos) = self.selected.iter().position(|&id| id == element) {
            self.selected.remove(pos);
        } else {
            self.selected.push(element);
        }

        let content = self.selected_html(doc).join("\n");
        debug!(
            selected = self.selected.len(),
            bytes = content.len(),
            "selection changed"
        );
        Some(content)
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.highlighted = None;
    }

    /// Stop inspecting and drop the selection.
    pub fn cleanup(&mut self) {
        self.stop();
        self.selected.clear();
    }

    pub fn selected(&self) -> &[NodeId] {
        &self.selected
    }

    pub fn highlighted(&self) -> Option<NodeId> {
        self.highlighted
    }

    /// Outer HTML of every selected node, in selection order.
    pub fn selected_html(&self, doc: &Document) -> Vec<String> {
        self.selected
            .iter()
            .filter_map(|&id| doc.node(id))
            .map(|n| n.outer_html.clone())
            .collect()
    }

    /// Highlight classes the page should currently show on `node`.
    pub fn classes_for(&self, node: NodeId) -> Vec<&'static str> {
        let mut classes = Vec::new();
        if self.highlighted == Some(node) {
            classes.push(HIGHLIGHT_CLASS);
        }
        if self.selected.contains(&node) {
            classes.push(SELECTED_CLASS);
        }
        classes
    }
}

fn closest_selectable(doc: &Document, target: NodeId) -> Option<NodeId> {
    doc.ancestors_or_self(target).find(|&id| {
        doc.node(id)
            .map(|n| SELECTABLE_TAGS.iter().any(|t| n.tag.eq_ignore_ascii_case(t)))
            .unwrap_or(false)
    })
}
