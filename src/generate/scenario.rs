use tracing::{info, warn};

use crate::capture::capture_model::ScreenElement;
use crate::error::ProviderError;
use crate::matcher::fuzzy::has_any_dom_match;
use crate::matcher::patcher::patch;
use crate::prompt::render::{escape_code_blocks, render};
use crate::prompt::templates::PromptKind;
use crate::provider::llm_provider::LlmProvider;

#[derive(Debug, Clone)]
pub struct ScenarioRequest {
    pub scenario: String,
    /// Free text such as "Playwright test" or "Cucumber feature file".
    pub output_type: String,
    pub language: String,
    pub engine: String,
    pub model: String,
}

/// What the current screen looked like at generation time.
#[derive(Debug, Clone, Default)]
pub struct ScreenContext {
    /// Legacy label list (`currentScreenElements`).
    pub labels: Vec<String>,
    /// Metadata records (`screenElementsMeta`).
    pub elements: Vec<ScreenElement>,
}

impl ScreenContext {
    /// Labels to match against: the legacy list when present, otherwise the
    /// metadata labels.
    pub fn match_labels(&self) -> Vec<String> {
        if self.labels.is_empty() {
            self.elements.iter().map(|e| e.label.clone()).collect()
        } else {
            self.labels.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Generated code after locator patching, or an inline error message.
    pub content: String,
    /// Some captured label occurs in the reply, so its locators were checked
    /// against the screen.
    pub patched: bool,
    /// Some captured label occurs in the scenario or the reply. When false
    /// the caller should warn that the code may target elements that are not
    /// on the current screen.
    pub dom_match: bool,
    pub failed: bool,
}

pub fn build_scenario_prompt(request: &ScenarioRequest, screen: &ScreenContext) -> String {
    let labels = screen.match_labels();
    let screen_elements = if labels.is_empty() {
        "(none captured)".to_string()
    } else {
        labels
            .iter()
            .map(|l| format!("- {l}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let scenario = escape_code_blocks(&request.scenario);

    render(
        PromptKind::ScenarioTestBuilder,
        &[
            ("scenario", scenario.as_str()),
            ("outputType", request.output_type.as_str()),
            ("language", request.language.as_str()),
            ("engine", request.engine.as_str()),
            ("screenElements", screen_elements.as_str()),
        ],
    )
}

/// Prompt, call the provider, then check and patch the reply against the
/// captured screen. Provider problems come back as inline content, never as
/// an error.
pub fn generate_scenario(
    request: &ScenarioRequest,
    provider: Result<&dyn LlmProvider, ProviderError>,
    screen: &ScreenContext,
) -> GenerationOutcome {
    let labels = screen.match_labels();

    let reply = provider.and_then(|p| {
        let prompt = build_scenario_prompt(request, screen);
        info!(provider = p.name(), model = %request.model, "generating scenario code");
        p.send_message(&prompt, &request.model)
    });

    let response = match reply {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "scenario generation failed");
            return GenerationOutcome {
                content: format!("Error: {e}"),
                patched: false,
                dom_match: has_any_dom_match(&request.scenario, "", &labels),
                failed: true,
            };
        }
    };

    let dom_match = has_any_dom_match(&request.scenario, &response.content, &labels);
    if !dom_match {
        warn!("generated code may reference elements that are not on the current screen");
    }

    let patched = patch(&response.content, &screen.elements);

    GenerationOutcome {
        content: patched.code,
        patched: patched.matched,
        dom_match,
        failed: false,
    }
}
