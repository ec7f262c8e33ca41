use crate::capture::capture_model::ScreenElement;

/// First element, in snapshot order, whose label occurs in `text`
/// (case-insensitive). No ranking: ties go to scan order.
pub fn match_element<'a>(text: &str, elements: &'a [ScreenElement]) -> Option<&'a ScreenElement> {
    let haystack = text.to_lowercase();
    elements.iter().find(|el| label_hit(&haystack, &el.label))
}

/// Every element whose label occurs in `text`, in snapshot order.
pub fn match_all<'a>(text: &str, elements: &'a [ScreenElement]) -> Vec<&'a ScreenElement> {
    let haystack = text.to_lowercase();
    elements
        .iter()
        .filter(|el| label_hit(&haystack, &el.label))
        .collect()
}

/// Whether any captured label shows up in the scenario or the model reply.
/// An empty label list never matches.
pub fn has_any_dom_match(scenario: &str, response: &str, labels: &[String]) -> bool {
    let all_text = format!("{scenario} {response}").to_lowercase();
    labels
        .iter()
        .any(|label| label_hit(&all_text, &label.to_lowercase()))
}

/// `haystack` must already be lower-cased.
fn label_hit(haystack: &str, label: &str) -> bool {
    !label.is_empty() && haystack.contains(label)
}
