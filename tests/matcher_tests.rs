mod common;

use common::utils::element;
use dom_testgen::matcher::fuzzy::{has_any_dom_match, match_all, match_element};
use dom_testgen::matcher::patcher::patch;

const EMAIL_TEST: &str = r#"await driver.findElement(By.id("ext-gen123")).sendKeys("user@example.com"); // email"#;

// =========================================================================
// Fuzzy matcher
// =========================================================================

#[test]
fn match_is_case_insensitive_substring() {
    let elements = vec![element("email", "input", r#"input[name="email"]"#)];

    let found = match_element("Type your EMAIL here", &elements).expect("match");
    assert_eq!(found.selector, r#"input[name="email"]"#);
}

#[test]
fn match_returns_first_in_snapshot_order() {
    let elements = vec![
        element("log in", "button", r#"button:contains("Log in")"#),
        element("email", "input", r#"input[name="email"]"#),
    ];

    let found = match_element("enter email then log in", &elements).unwrap();
    assert_eq!(found.label, "log in");

    let all: Vec<&str> = match_all("enter email then log in", &elements)
        .iter()
        .map(|e| e.label.as_str())
        .collect();
    assert_eq!(all, vec!["log in", "email"]);
}

#[test]
fn match_none_for_unrelated_text() {
    let elements = vec![element("email", "input", r#"input[name="email"]"#)];
    assert!(match_element("fill in the password", &elements).is_none());
    assert!(match_element("anything", &[]).is_none());
}

#[test]
fn empty_label_never_matches() {
    let elements = vec![element("", "div", "div")];
    assert!(match_element("some text", &elements).is_none());
}

#[test]
fn dom_match_checks_scenario_and_response() {
    let labels = vec!["create lead".to_string(), "company name".to_string()];

    assert!(has_any_dom_match("Click Create Lead", "", &labels));
    assert!(has_any_dom_match("", "page.fill('Company Name')", &labels));
    assert!(!has_any_dom_match("open the home page", "await page.goto('/')", &labels));
    assert!(!has_any_dom_match("create lead", "", &[]));
}

// =========================================================================
// Code patcher
// =========================================================================

#[test]
fn patch_rewrites_id_locator_with_captured_selector() {
    let elements = vec![element("email", "input", r#"input[name="email"]"#)];

    let result = patch(EMAIL_TEST, &elements);

    assert!(result.matched);
    assert_eq!(
        result.code,
        r#"await driver.findElement(By.cssSelector('input[name="email"]')).sendKeys("user@example.com"); // email"#
    );
}

#[test]
fn patch_leaves_code_alone_without_match() {
    let elements = vec![element("email", "input", r#"input[name="email"]"#)];
    let code = r#"driver.findElement(By.name("pwd")).sendKeys("secret"); // password"#;

    let result = patch(code, &elements);

    assert!(!result.matched);
    assert_eq!(result.code, code);
}

#[test]
fn patch_never_writes_text_fallback_selectors() {
    let elements = vec![element("log in", "button", r#"button:contains("Log in")"#)];
    let code = r#"driver.findElement(By.id("btn-7")).click(); // log in"#;

    let result = patch(code, &elements);

    assert!(result.matched, "label still counts as a match");
    assert_eq!(result.code, code);
}

#[test]
fn patch_handles_xpath_with_parentheses_and_single_quotes() {
    let elements = vec![element("search", "input", r#"input[placeholder="Search"]"#)];
    let code = "driver.findElement(By.xpath('//input[contains(@class, \"q\")]')); // search";

    let result = patch(code, &elements);

    assert_eq!(
        result.code,
        r#"driver.findElement(By.cssSelector('input[placeholder="Search"]')); // search"#
    );
}

#[test]
fn patch_first_resolvable_element_claims_every_locator() {
    let elements = vec![
        element("log in", "button", r#"button:contains("Log in")"#),
        element("email", "input", r#"input[name="email"]"#),
        element("password", "input", r#"input[aria-label="Password"]"#),
    ];
    let code = "// email, password, log in\n\
                By.id(\"a\");\n\
                By.name(\"b\");";

    let result = patch(code, &elements);

    assert_eq!(
        result.code,
        "// email, password, log in\n\
         By.cssSelector('input[name=\"email\"]');\n\
         By.cssSelector('input[name=\"email\"]');"
    );
}

#[test]
fn patch_escapes_single_quotes_in_selector() {
    let elements = vec![element("o'brien", "input", r#"input[placeholder="O'Brien"]"#)];
    let code = r#"By.id("x") // o'brien"#;

    let result = patch(code, &elements);

    assert_eq!(
        result.code,
        r#"By.cssSelector('input[placeholder="O\'Brien"]') // o'brien"#
    );
}

#[test]
fn patch_ignores_css_and_other_locators() {
    let elements = vec![element("email", "input", r#"input[name="email"]"#)];
    let code = r#"By.className("x"); By.cssSelector('#email');"#;

    let result = patch(code, &elements);

    assert!(result.matched);
    assert_eq!(result.code, code);
}
