use serde::{Deserialize, Serialize};

use crate::error::PromptError;

/// Every built-in prompt. Templates use `${name}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromptKind {
    PlaywrightCodeGeneration,
    PlaywrightTypescriptPageOnly,
    CypressTypescriptCodeGeneration,
    CypressTypescriptPageOnly,
    WebdriverioTypescriptCodeGeneration,
    WebdriverioTypescriptPageOnly,
    SeleniumJavaTestOnly,
    SeleniumJavaPageOnly,
    SeleniumPythonTestOnly,
    SeleniumPythonPageOnly,
    CucumberOnly,
    ScenarioTestBuilder,
}

impl PromptKind {
    pub const ALL: [PromptKind; 12] = [
        PromptKind::PlaywrightCodeGeneration,
        PromptKind::PlaywrightTypescriptPageOnly,
        PromptKind::CypressTypescriptCodeGeneration,
        PromptKind::CypressTypescriptPageOnly,
        PromptKind::WebdriverioTypescriptCodeGeneration,
        PromptKind::WebdriverioTypescriptPageOnly,
        PromptKind::SeleniumJavaTestOnly,
        PromptKind::SeleniumJavaPageOnly,
        PromptKind::SeleniumPythonTestOnly,
        PromptKind::SeleniumPythonPageOnly,
        PromptKind::CucumberOnly,
        PromptKind::ScenarioTestBuilder,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PromptKind::PlaywrightCodeGeneration => "PLAYWRIGHT_CODE_GENERATION",
            PromptKind::PlaywrightTypescriptPageOnly => "PLAYWRIGHT_TYPESCRIPT_PAGE_ONLY",
            PromptKind::CypressTypescriptCodeGeneration => "CYPRESS_TYPESCRIPT_CODE_GENERATION",
            PromptKind::CypressTypescriptPageOnly => "CYPRESS_TYPESCRIPT_PAGE_ONLY",
            PromptKind::WebdriverioTypescriptCodeGeneration => {
                "WEBDRIVERIO_TYPESCRIPT_CODE_GENERATION"
            }
            PromptKind::WebdriverioTypescriptPageOnly => "WEBDRIVERIO_TYPESCRIPT_PAGE_ONLY",
            PromptKind::SeleniumJavaTestOnly => "SELENIUM_JAVA_TEST_ONLY",
            PromptKind::SeleniumJavaPageOnly => "SELENIUM_JAVA_PAGE_ONLY",
            PromptKind::SeleniumPythonTestOnly => "SELENIUM_PYTHON_TEST_ONLY",
            PromptKind::SeleniumPythonPageOnly => "SELENIUM_PYTHON_PAGE_ONLY",
            PromptKind::CucumberOnly => "CUCUMBER_ONLY",
            PromptKind::ScenarioTestBuilder => "SCENARIO_TEST_BUILDER",
        }
    }

    pub fn from_key(key: &str) -> Result<Self, PromptError> {
        Self::ALL
            .into_iter()
            .find(|k| k.key() == key)
            .ok_or_else(|| PromptError::NotFound(key.to_string()))
    }

    /// Name shown in the generator picker.
    pub fn generator_name(&self) -> &'static str {
        match self {
            PromptKind::PlaywrightTypescriptPageOnly => "Playwright-TS-Page-Generator",
            PromptKind::PlaywrightCodeGeneration => "Playwright-TS-Code-Generator",
            PromptKind::CypressTypescriptCodeGeneration => "Cypress-TS-Page-Generator",
            PromptKind::CypressTypescriptPageOnly => "Cypress-TS-Code-Generator",
            PromptKind::SeleniumJavaPageOnly => "Selenium-Java-Page-Only",
            PromptKind::SeleniumJavaTestOnly => "Selenium-Java-Test-Only",
            PromptKind::SeleniumPythonTestOnly => "Selenium-Python-Test-Only",
            PromptKind::SeleniumPythonPageOnly => "Selenium-Python-Page-Only",
            PromptKind::WebdriverioTypescriptCodeGeneration => "WebdriverIO-TS-Page-Generator",
            PromptKind::WebdriverioTypescriptPageOnly => "WebdriverIO-TS-Code-Generator",
            PromptKind::CucumberOnly => "Cucumber-Only",
            PromptKind::ScenarioTestBuilder => "Scenario-Test-Builder",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            PromptKind::PlaywrightCodeGeneration => PLAYWRIGHT_CODE_GENERATION,
            PromptKind::PlaywrightTypescriptPageOnly => PLAYWRIGHT_TYPESCRIPT_PAGE_ONLY,
            PromptKind::CypressTypescriptCodeGeneration => CYPRESS_TYPESCRIPT_CODE_GENERATION,
            PromptKind::CypressTypescriptPageOnly => CYPRESS_TYPESCRIPT_PAGE_ONLY,
            PromptKind::WebdriverioTypescriptCodeGeneration => {
                WEBDRIVERIO_TYPESCRIPT_CODE_GENERATION
            }
            PromptKind::WebdriverioTypescriptPageOnly => WEBDRIVERIO_TYPESCRIPT_PAGE_ONLY,
            PromptKind::SeleniumJavaTestOnly => SELENIUM_JAVA_TEST_ONLY,
            PromptKind::SeleniumJavaPageOnly => SELENIUM_JAVA_PAGE_ONLY,
            PromptKind::SeleniumPythonTestOnly => SELENIUM_PYTHON_TEST_ONLY,
            PromptKind::SeleniumPythonPageOnly => SELENIUM_PYTHON_PAGE_ONLY,
            PromptKind::CucumberOnly => CUCUMBER_ONLY,
            PromptKind::ScenarioTestBuilder => SCENARIO_TEST_BUILDER,
        }
    }
}

const PLAYWRIGHT_CODE_GENERATION: &str = r#"
Given the following DOM structure:
```html
${domContent}
```

Generate Playwright test code in TypeScript to perform the following action:
${userAction}

Here is the page URL:
${pageUrl}

Requirements:
1. Locators, in priority order:
   - HTML ids or names when they exist (never an id whose value has more than one digit)
   - getByRole, then getByLabel, then getByText, then getByTestId
   - any other locator only when none of the above apply
2. Use TypeScript with type annotations and web-first assertions.
3. Keep frequently used locators in variables; rely on auto-waiting, no hard-coded waits.
4. Set the test timeout to 90 seconds.
5. If the action navigates to a new page, do not assert on that page's DOM.

Respond with only the complete code block and no other text.

```typescript
import { test, expect } from '@playwright/test';
test('descriptive test name', async ({ page }) => {
  // Implementation
});
```
"#;

const PLAYWRIGHT_TYPESCRIPT_PAGE_ONLY: &str = r#"
Given the following DOM structure:
```html
${domContent}
```

We want ONLY a Playwright TypeScript Page Object class for that DOM.
Action to perform: ${userAction}
URL: ${pageUrl}

Instructions:
1. Create a class `ComponentPage` with a constructor taking `page: Page`.
2. Declare one readonly Locator per relevant element (inputs, selects, buttons, links).
3. Prefer ids or names, then getByRole, getByLabel, getByText.
4. Add one async method per action (fill, select, click), returning Promise<void>.
5. Do not generate a test, assertions or explanations.

Respond with a single ```typescript code block.
"#;

const CYPRESS_TYPESCRIPT_CODE_GENERATION: &str = r#"
Given the following DOM structure:
```html
${domContent}
```

Generate a Cypress test in TypeScript to perform the following action:
${userAction}

Here is the page URL:
${pageUrl}

Requirements:
1. Prefer data-* attributes, ids and names; fall back to cy.contains for text.
2. Use cy.visit for navigation and chained assertions (`should`).
3. No cy.wait with fixed times; rely on retry-ability.
4. Group steps inside one describe/it block with a descriptive name.

Respond with only the complete code block and no other text.
"#;

const CYPRESS_TYPESCRIPT_PAGE_ONLY: &str = r#"
Given the following DOM structure:
```html
${domContent}
```

We want ONLY a Cypress TypeScript Page Object class for that DOM.
Action to perform: ${userAction}
URL: ${pageUrl}

Instructions:
1. Create `export class ComponentPage` with one getter per relevant element returning cy.get(...).
2. Add one method per action (type, select, click).
3. Prefer ids, names and data-* attributes for selectors.
4. Do not generate a spec file or any explanation.

Respond with a single ```typescript code block.
"#;

const WEBDRIVERIO_TYPESCRIPT_CODE_GENERATION: &str = r#"
Given the following DOM structure:
```html
${domContent}
```

Generate a WebdriverIO test in TypeScript to perform the following action:
${userAction}

Here is the page URL:
${pageUrl}

Requirements:
1. Use $ / $$ with ids, names or accessible selectors (`aria/...`).
2. Use expect-webdriverio assertions such as toBeDisplayed and toHaveText.
3. Await every command; avoid browser.pause.
4. Wrap the steps in describe/it with descriptive names.

Respond with only the complete code block and no other text.
"#;

const WEBDRIVERIO_TYPESCRIPT_PAGE_ONLY: &str = r#"
Given the following DOM structure:
```html
${domContent}
```

We want ONLY a WebdriverIO TypeScript Page Object class for that DOM.
Action to perform: ${userAction}
URL: ${pageUrl}

Instructions:
1. Create `export class ComponentPage` with one getter per relevant element (`get username() { return $('#username'); }`).
2. Add one async method per action.
3. Add an `open()` method that navigates to the URL.
4. No tests and no explanations.

Respond with a single ```typescript code block.
"#;

const SELENIUM_JAVA_TEST_ONLY: &str = r#"
Given the following DOM structure:
```html
${domContent}
```

We want ONLY a Selenium Java TestNG test class for that DOM.
Action to perform: ${userAction}
URL: ${pageUrl}

Instructions:
1. Use ChromeDriver created in a @BeforeMethod and quit it in @AfterMethod.
2. Locate elements with By.id, By.name or By.xpath, in that order of preference.
3. Use WebDriverWait with ExpectedConditions instead of Thread.sleep.
4. One @Test method performing the action and asserting the visible outcome.

Respond with a single ```java code block and no other text.
"#;

const SELENIUM_JAVA_PAGE_ONLY: &str = r#"
Given the following DOM structure:
```html
${domContent}
```

We want ONLY a Selenium Java Page Object class for that DOM.
Action to perform: ${userAction}
URL: ${pageUrl}

Instructions:
1. Create `public class ComponentPage` with a constructor taking WebDriver.
2. Declare one private By locator per relevant element.
3. Add one public method per action; methods that navigate return the next page object.
4. No test class, no main method, no explanations.

Respond with a single ```java code block.
"#;

const SELENIUM_PYTHON_TEST_ONLY: &str = r#"
Given the following DOM structure:
```html
${domContent}
```

We want ONLY a Selenium Python pytest test for that DOM.
Action to perform: ${userAction}
URL: ${pageUrl}

Instructions:
1. Provide a `driver` fixture that starts Chrome and quits it after the test.
2. Locate elements with By.ID, By.NAME or By.XPATH, in that order of preference.
3. Use WebDriverWait with expected_conditions instead of time.sleep.
4. One test function performing the action and asserting the visible outcome.

Respond with a single ```python code block and no other text.
"#;

const SELENIUM_PYTHON_PAGE_ONLY: &str = r#"
Given the following DOM structure:
```html
${domContent}
```

We want ONLY a Selenium Python Page Object class for that DOM.
Action to perform: ${userAction}
URL: ${pageUrl}

Instructions:
1. Create `class ComponentPage` whose __init__ takes the driver.
2. Declare locators as class-level tuples, e.g. `USERNAME = (By.ID, "username")`.
3. Add one method per action using explicit waits.
4. No tests and no explanations.

Respond with a single ```python code block.
"#;

const CUCUMBER_ONLY: &str = r#"
Given the following DOM structure:
```html
${domContent}
```

We want a Cucumber (Gherkin) .feature file referencing every relevant field in the DOM snippet.

Instructions:
1. No explanations or extra text beyond the .feature content.
2. Identify each relevant element (input, textarea, select, button, ...).
3. Create one step per element, referencing a placeholder such as <fieldName>:
   - When I type <companyName> into the 'Company Name' field
   - And I choose <state> in the 'State' dropdown
   - And I click the 'Create Lead' button
4. Use a Scenario Outline with an Examples table for the placeholders.
5. One action per step.

```gherkin
Feature: Describe your feature
  As a user of the system
  I want to ${userAction}
  So that <some reason>

  Scenario Outline: A scenario describing ${userAction}
    Given I open "${pageUrl}"
    Then I should see <some expected outcome>

  Examples:
    | field1 | field2 |
```
"#;

const SCENARIO_TEST_BUILDER: &str = r#"
You are a senior test automation engineer.

Write ${outputType} for the following scenario, using the ${language} language binding and the ${engine} browser engine:
${scenario}

Elements currently visible on the page under test:
${screenElements}

Instructions:
1. Only interact with elements from the list above; if the scenario needs an element that is not listed, add a comment saying it was not found on the current screen.
2. Prefer id, name or accessible-label locators.
3. Use explicit waits, never fixed sleeps.
4. Respond with a single code block and no other text.
"#;
