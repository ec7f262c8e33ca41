use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::provider::llm_provider::{LlmProvider, LlmResponse};

pub struct OllamaProvider {
    pub endpoint: String,
}

impl Default for OllamaProvider {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434/api/generate".to_string(),
        }
    }
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaProvider {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }
}

impl LlmProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn send_message(&self, prompt: &str, model: &str) -> Result<LlmResponse, ProviderError> {
        let request = OllamaRequest {
            model,
            prompt,
            stream: false,
        };

        let http = |source| ProviderError::Http {
            provider: "ollama",
            source,
        };

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .map_err(http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: "ollama",
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let parsed: OllamaResponse = response.json().map_err(http)?;
        if parsed.response.trim().is_empty() {
            return Err(ProviderError::EmptyResponse { provider: "ollama" });
        }

        Ok(LlmResponse {
            content: parsed.response,
        })
    }
}
