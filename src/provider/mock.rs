use std::cell::RefCell;

use crate::error::ProviderError;
use crate::provider::llm_provider::{LlmProvider, LlmResponse};

/// Offline provider: returns a fixed reply (or a fixed failure) and keeps
/// the prompts it was sent.
pub struct MockProvider {
    reply: Result<String, String>,
    prompts: RefCell<Vec<String>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::replying("```text\n// mock provider: no code generated\n```")
    }
}

impl MockProvider {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Every call fails with an empty-response error; `reason` only goes to the log.
    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_string()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn send_message(&self, prompt: &str, _model: &str) -> Result<LlmResponse, ProviderError> {
        self.prompts.borrow_mut().push(prompt.to_string());

        match &self.reply {
            Ok(content) => Ok(LlmResponse {
                content: content.clone(),
            }),
            Err(reason) => {
                tracing::debug!(%reason, "mock provider failing on purpose");
                Err(ProviderError::EmptyResponse { provider: "mock" })
            }
        }
    }
}
