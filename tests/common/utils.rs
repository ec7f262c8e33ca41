#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use dom_testgen::capture::capture_model::ScreenElement;
use dom_testgen::dom::dom_model::{ComputedStyle, Document, DomNode};
use dom_testgen::dom::html::load_document;

pub fn fixture(name: &str) -> PathBuf {
    let base = std::env::current_dir().unwrap();
    base.join("tests").join("fixtures").join(name)
}

pub fn load_fixture(name: &str) -> Document {
    load_document(&fixture(name)).expect("fixture loads")
}

/// A laid-out, visible node with the given tag and text.
pub fn visible(tag: &str, text: &str) -> DomNode {
    DomNode {
        tag: tag.to_string(),
        attributes: BTreeMap::new(),
        text: text.to_string(),
        style: Some(ComputedStyle::new("block", "visible")),
        has_layout_box: true,
        parent: None,
        outer_html: format!("<{tag}>{text}</{tag}>"),
    }
}

pub fn with_attr(mut node: DomNode, name: &str, value: &str) -> DomNode {
    node.attributes.insert(name.to_string(), value.to_string());
    node
}

pub fn element(label: &str, tag: &str, selector: &str) -> ScreenElement {
    ScreenElement {
        label: label.to_string(),
        tag: tag.to_string(),
        selector: selector.to_string(),
    }
}
