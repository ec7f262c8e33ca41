use dom_testgen::error::PromptError;
use dom_testgen::prompt::render::{escape_code_blocks, get_prompt, render};
use dom_testgen::prompt::templates::PromptKind;

#[test]
fn every_kind_resolves_by_key() {
    for kind in PromptKind::ALL {
        assert_eq!(PromptKind::from_key(kind.key()).unwrap(), kind);
        assert!(!kind.template().trim().is_empty(), "{} is empty", kind.key());
    }
}

#[test]
fn unknown_key_is_not_found() {
    let err = get_prompt("NOT_A_PROMPT", &[]).unwrap_err();
    assert!(matches!(err, PromptError::NotFound(ref k) if k == "NOT_A_PROMPT"));
    assert_eq!(err.to_string(), "Prompt not found: NOT_A_PROMPT");
}

#[test]
fn get_prompt_fills_every_occurrence() {
    let prompt = get_prompt(
        "CUCUMBER_ONLY",
        &[
            ("domContent", "<form></form>"),
            ("userAction", "submit the form"),
            ("pageUrl", "https://example.test/login"),
        ],
    )
    .unwrap();

    assert!(!prompt.contains("${userAction}"));
    assert!(prompt.contains("I want to submit the form"));
    assert!(prompt.contains("A scenario describing submit the form"));
    assert!(prompt.contains("Given I open \"https://example.test/login\""));
}

#[test]
fn missing_variables_stay_as_placeholders() {
    let prompt = get_prompt("PLAYWRIGHT_CODE_GENERATION", &[("userAction", "click Save")]).unwrap();

    assert!(prompt.contains("click Save"));
    assert!(prompt.contains("${domContent}"));
    assert!(prompt.contains("${pageUrl}"));
}

#[test]
fn rendered_prompt_is_trimmed() {
    let prompt = render(PromptKind::SeleniumJavaTestOnly, &[]);
    assert_eq!(prompt, prompt.trim());
}

#[test]
fn code_fences_are_escaped() {
    assert_eq!(escape_code_blocks("a ```b``` c"), "a \\`\\`\\`b\\`\\`\\` c");
    assert_eq!(escape_code_blocks("plain"), "plain");
}

#[test]
fn generator_names_are_distinct() {
    let mut names: Vec<&str> = PromptKind::ALL.iter().map(|k| k.generator_name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), PromptKind::ALL.len());
}
