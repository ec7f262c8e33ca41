use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::DomError;

/// Index of a node inside [`Document::nodes`]. Indices follow document order.
pub type NodeId = usize;

/// Computed style values the capture pipeline looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedStyle {
    pub display: String,
    pub visibility: String,
}

impl ComputedStyle {
    pub fn new(display: &str, visibility: &str) -> Self {
        Self {
            display: display.to_string(),
            visibility: visibility.to_string(),
        }
    }
}

/// One element of the inspected page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomNode {
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Full text content, descendants included.
    #[serde(default)]
    pub text: String,
    /// `None` when the host could not compute a style for the node.
    #[serde(default)]
    pub style: Option<ComputedStyle>,
    /// Whether the node has a containing block (is laid out at all).
    #[serde(default)]
    pub has_layout_box: bool,
    #[serde(default)]
    pub parent: Option<NodeId>,
    #[serde(default)]
    pub outer_html: String,
}

impl DomNode {
    /// Attribute value, treating an empty value as absent.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// A page snapshot: element nodes in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub nodes: Vec<DomNode>,
}

impl Document {
    /// Parse the JSON snapshot format emitted by a browser-side extractor.
    pub fn from_json(json: &str) -> Result<Self, DomError> {
        let doc: Document = serde_json::from_str(json).map_err(|source| DomError::JsonParse {
            context: "page snapshot".into(),
            source,
        })?;
        doc.validate()?;
        Ok(doc)
    }

    /// Parents must point backwards in document order.
    pub fn validate(&self) -> Result<(), DomError> {
        for (node, n) in self.nodes.iter().enumerate() {
            if let Some(parent) = n.parent {
                if parent >= node {
                    return Err(DomError::DanglingParent { node, parent });
                }
            }
        }
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&DomNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes with the given tag, in document order (like `querySelectorAll(tag)`).
    pub fn nodes_with_tag<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = (NodeId, &'a DomNode)> + 'a {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.tag.eq_ignore_ascii_case(tag))
    }

    /// The node itself followed by its ancestors, innermost first.
    pub fn ancestors_or_self(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(id).map(|_| id), move |&current| {
            self.nodes.get(current).and_then(|n| n.parent)
        })
    }
}
