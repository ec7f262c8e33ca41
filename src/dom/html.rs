use scraper::{ElementRef, Html, Selector};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::dom::dom_model::{ComputedStyle, Document, DomNode};
use crate::error::DomError;

/// Tags the browser never renders a box for.
const NON_RENDERED_TAGS: &[&str] = &[
    "head", "script", "style", "template", "noscript", "title", "meta", "link", "base",
];

const INLINE_TAGS: &[&str] = &[
    "a", "span", "label", "button", "input", "select", "textarea", "img", "b", "i", "em",
    "strong", "small", "code",
];

/// Load a page snapshot from disk. `.json` files use the extractor format,
/// anything else is parsed as HTML.
pub fn load_document(path: &Path) -> Result<Document, DomError> {
    let content = std::fs::read_to_string(path).map_err(|source| DomError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        Document::from_json(&content)
    } else {
        let url = format!("file://{}", path.display());
        Ok(parse_html(&content, Some(&url)))
    }
}

/// Build a [`Document`] from static HTML.
///
/// There is no stylesheet engine here: computed style comes from inline
/// `style` declarations, the `hidden` attribute, `input[type=hidden]` and
/// non-rendered tags. `display:none` removes the layout box of every
/// descendant; `visibility` inherits.
pub fn parse_html(html: &str, url: Option<&str>) -> Document {
    let parsed = Html::parse_document(html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|sel| parsed.select(&sel).next())
        .map(|t| t.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let elements: Vec<ElementRef> = parsed
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .collect();
    let index: HashMap<_, usize> = elements
        .iter()
        .enumerate()
        .map(|(i, el)| (el.id(), i))
        .collect();

    let mut nodes: Vec<DomNode> = Vec::with_capacity(elements.len());

    for el in &elements {
        let parent = el
            .parent()
            .and_then(ElementRef::wrap)
            .and_then(|p| index.get(&p.id()).copied());

        let tag = el.value().name().to_ascii_lowercase();
        let attributes: BTreeMap<String, String> = el
            .value()
            .attrs()
            .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
            .collect();

        let declared = inline_declarations(attributes.get("style").map(String::as_str));
        // Hidden inputs are `display:none !important` in every browser.
        let display = if is_hidden_input(&tag, &attributes) {
            "none".to_string()
        } else {
            declared
                .get("display")
                .cloned()
                .unwrap_or_else(|| ua_display(&tag, &attributes).to_string())
        };

        let parent_node = parent.and_then(|p| nodes.get(p));
        let visibility = declared.get("visibility").cloned().unwrap_or_else(|| {
            parent_node
                .and_then(|p| p.style.as_ref())
                .map(|s| s.visibility.clone())
                .unwrap_or_else(|| "visible".to_string())
        });
        let has_layout_box =
            display != "none" && parent_node.map(|p| p.has_layout_box).unwrap_or(true);

        nodes.push(DomNode {
            tag,
            attributes,
            text: el.text().collect(),
            style: Some(ComputedStyle { display, visibility }),
            has_layout_box,
            parent,
            outer_html: el.html(),
        });
    }

    Document {
        url: url.map(str::to_string),
        title,
        nodes,
    }
}

fn is_hidden_input(tag: &str, attributes: &BTreeMap<String, String>) -> bool {
    tag == "input"
        && attributes
            .get("type")
            .is_some_and(|t| t.eq_ignore_ascii_case("hidden"))
}

fn ua_display(tag: &str, attributes: &BTreeMap<String, String>) -> &'static str {
    if attributes.contains_key("hidden") || NON_RENDERED_TAGS.contains(&tag) {
        "none"
    } else if INLINE_TAGS.contains(&tag) {
        "inline"
    } else {
        "block"
    }
}

/// `display` and `visibility` from an inline `style` attribute, lower-cased.
fn inline_declarations(style: Option<&str>) -> HashMap<String, String> {
    let mut out = HashMap::new();
    let Some(style) = style else {
        return out;
    };

    for decl in style.split(';') {
        let Some((prop, value)) = decl.split_once(':') else {
            continue;
        };
        let prop = prop.trim().to_ascii_lowercase();
        if prop != "display" && prop != "visibility" {
            continue;
        }
        let value = value
            .trim()
            .trim_end_matches("!important")
            .trim()
            .to_ascii_lowercase();
        if !value.is_empty() {
            out.insert(prop, value);
        }
    }

    out
}
