use serde::{Deserialize, Serialize};

use tracing::debug;

use crate::error::ProviderError;
use crate::provider::llm_provider::{LlmProvider, LlmResponse};

/// Client for any endpoint speaking the OpenAI chat-completions format
/// (OpenAI, Groq, Testleaf).
pub struct ChatCompletionsClient {
    provider: &'static str,
    endpoint: String,
    api_key: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsClient {
    pub fn new(provider: &'static str, endpoint: &str, api_key: String) -> Self {
        Self {
            provider,
            endpoint: endpoint.to_string(),
            api_key,
        }
    }
}

impl LlmProvider for ChatCompletionsClient {
    fn name(&self) -> &'static str {
        self.provider
    }

    fn send_message(&self, prompt: &str, model: &str) -> Result<LlmResponse, ProviderError> {
        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(provider = self.provider, model, "sending chat completion");

        let http = |source| ProviderError::Http {
            provider: self.provider,
            source,
        };

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::Status {
                provider: self.provider,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().map_err(http)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse {
                provider: self.provider,
            })?;

        Ok(LlmResponse { content })
    }
}
