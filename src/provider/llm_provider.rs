use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::provider::mock::MockProvider;
use crate::provider::ollama::OllamaProvider;
use crate::provider::openai::ChatCompletionsClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmResponse {
    pub content: String,
}

/// A chat-style model endpoint.
pub trait LlmProvider {
    fn name(&self) -> &'static str;

    fn send_message(&self, prompt: &str, model: &str) -> Result<LlmResponse, ProviderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Openai,
    Groq,
    Testleaf,
    Ollama,
    Mock,
}

impl ProviderKind {
    pub fn from_name(name: &str) -> Result<Self, ProviderError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::Openai),
            "groq" => Ok(ProviderKind::Groq),
            "testleaf" => Ok(ProviderKind::Testleaf),
            "ollama" => Ok(ProviderKind::Ollama),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(ProviderError::Unsupported(other.to_string())),
        }
    }

    /// Environment variable holding the API key, if the provider needs one.
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            ProviderKind::Openai => Some("OPENAI_API_KEY"),
            ProviderKind::Groq => Some("GROQ_API_KEY"),
            ProviderKind::Testleaf => Some("TESTLEAF_API_KEY"),
            ProviderKind::Ollama | ProviderKind::Mock => None,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Openai => "gpt-4o-mini",
            ProviderKind::Groq => "llama-3.3-70b-versatile",
            ProviderKind::Testleaf => "gpt-4o-mini",
            ProviderKind::Ollama => "qwen2.5:1.5b",
            ProviderKind::Mock => "mock",
        }
    }
}

/// Everything needed to build a provider client.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
}

pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

pub fn build_provider(settings: &ProviderSettings) -> Result<Box<dyn LlmProvider>, ProviderError> {
    let api_key = settings.api_key.clone().filter(|k| !k.trim().is_empty());

    match settings.kind {
        ProviderKind::Openai => Ok(Box::new(ChatCompletionsClient::new(
            "openai",
            settings.endpoint.as_deref().unwrap_or(OPENAI_ENDPOINT),
            api_key.ok_or(ProviderError::MissingApiKey("openai"))?,
        ))),
        ProviderKind::Groq => Ok(Box::new(ChatCompletionsClient::new(
            "groq",
            settings.endpoint.as_deref().unwrap_or(GROQ_ENDPOINT),
            api_key.ok_or(ProviderError::MissingApiKey("groq"))?,
        ))),
        ProviderKind::Testleaf => {
            let endpoint = settings
                .endpoint
                .as_deref()
                .ok_or(ProviderError::MissingEndpoint("testleaf"))?;
            Ok(Box::new(ChatCompletionsClient::new(
                "testleaf",
                endpoint,
                api_key.ok_or(ProviderError::MissingApiKey("testleaf"))?,
            )))
        }
        ProviderKind::Ollama => Ok(Box::new(match settings.endpoint.as_deref() {
            Some(endpoint) => OllamaProvider::new(endpoint),
            None => OllamaProvider::default(),
        })),
        ProviderKind::Mock => Ok(Box::new(MockProvider::default())),
    }
}
