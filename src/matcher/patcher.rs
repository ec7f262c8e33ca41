use regex::{NoExpand, Regex};
use std::sync::LazyLock;

use tracing::{debug, warn};

use crate::capture::capture_model::ScreenElement;
use crate::matcher::fuzzy::match_all;

/// `By.id(...)`, `By.name(...)` and `By.xpath(...)` with a single- or
/// double-quoted argument. Quoted so xpath arguments may contain parentheses.
static LOCATOR_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"By\.(?:id|name|xpath)\(\s*(?:"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*')\s*\)"#)
        .expect("locator pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchResult {
    pub code: String,
    /// At least one label occurred in the code, whether or not anything was
    /// rewritten.
    pub matched: bool,
}

/// Rewrite id/name/xpath locators to `By.cssSelector(...)` for every element
/// whose label occurs in `code`.
///
/// Replacement is global per matching element and runs in snapshot order,
/// so the first matching element with a usable selector claims every
/// locator call. Text-fallback selectors are never written into code.
pub fn patch(code: &str, elements: &[ScreenElement]) -> PatchResult {
    let hits = match_all(code, elements);
    let matched = !hits.is_empty();

    let mut patched = code.to_string();
    for el in hits {
        if !el.has_resolvable_selector() {
            debug!(label = %el.label, "skipping text-fallback selector");
            continue;
        }

        let replacement = css_selector_call(&el.selector);
        let rewritten = LOCATOR_CALL
            .replace_all(&patched, NoExpand(&replacement))
            .into_owned();
        if rewritten != patched {
            debug!(label = %el.label, selector = %el.selector, "rewrote locators");
            patched = rewritten;
        }
    }

    if !matched {
        warn!("generated code references no captured element");
    }

    PatchResult {
        code: patched,
        matched,
    }
}

fn css_selector_call(selector: &str) -> String {
    let escaped = selector.replace('\\', "\\\\").replace('\'', "\\'");
    format!("By.cssSelector('{escaped}')")
}
