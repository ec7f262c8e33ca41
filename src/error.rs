use thiserror::Error;

/// Loading a page snapshot into a [`crate::dom::dom_model::Document`] failed.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("failed to read page '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON parse error ({context}): {source}")]
    JsonParse {
        context: String,
        source: serde_json::Error,
    },

    /// A node references a parent index outside the node list.
    #[error("node {node} has dangling parent {parent}")]
    DanglingParent { node: usize, parent: usize },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error ({path}): {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("store contents are not a JSON object ({path}): {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to decode value for key '{key}': {source}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },

    #[error("failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Prompt not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Unsupported provider selected: {0}")]
    Unsupported(String),

    #[error("missing API key for {0}")]
    MissingApiKey(&'static str),

    #[error("no endpoint configured for {0}")]
    MissingEndpoint(&'static str),

    #[error("request to {provider} failed: {source}")]
    Http {
        provider: &'static str,
        source: reqwest::Error,
    },

    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} returned an empty completion")]
    EmptyResponse { provider: &'static str },
}

/// Top-level error for the command-line front-end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("I/O error ({context}): {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
