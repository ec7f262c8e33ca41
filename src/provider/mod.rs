pub mod llm_provider;
pub mod mock;
pub mod ollama;
pub mod openai;
