use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::capture::capture_model::CaptureOutput;
use crate::capture::scheduler::CaptureScheduler;
use crate::provider::llm_provider::{ProviderKind, ProviderSettings};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "dom-testgen",
    version,
    about = "Capture visible page elements and generate DOM-aware test code"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: dom-testgen.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Key-value store file (overrides capture.store from the config)
    #[arg(long, global = true)]
    pub store: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a page snapshot once and persist the captured elements
    Capture {
        /// HTML file or JSON snapshot
        #[arg(long)]
        page: String,

        /// Output shapes to persist (repeatable)
        #[arg(long, value_enum)]
        output: Vec<CaptureOutput>,
    },

    /// Re-capture whenever the page file changes, debounced
    Watch {
        #[arg(long)]
        page: String,

        /// File polling interval in milliseconds
        #[arg(long, default_value_t = 100)]
        poll_ms: u64,

        /// Stop after this many capture passes
        #[arg(long)]
        max_scans: Option<u64>,
    },

    /// Print the first captured element mentioned in a text
    Match {
        #[arg(long)]
        text: String,
    },

    /// Rewrite id/name/xpath locators in generated code using captured selectors
    Patch {
        /// File with generated code ("-" for stdin)
        #[arg(long)]
        code: String,
    },

    /// Render a prompt template
    Prompt {
        /// Template key, e.g. PLAYWRIGHT_CODE_GENERATION
        #[arg(long, required_unless_present = "list")]
        kind: Option<String>,

        /// Template variable as name=value (repeatable)
        #[arg(long = "var")]
        vars: Vec<String>,

        /// List the available templates
        #[arg(long)]
        list: bool,
    },

    /// Generate test code for a natural-language scenario
    Generate {
        #[arg(long)]
        scenario: String,

        #[arg(long, default_value = "Playwright test")]
        output_type: String,

        #[arg(long, value_enum)]
        provider: Option<ProviderKind>,

        #[arg(long)]
        model: Option<String>,
    },

    /// Answer JSON-line messages on stdin for a page snapshot
    Serve {
        #[arg(long)]
        page: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `dom-testgen.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_outputs")]
    pub outputs: Vec<CaptureOutput>,

    #[serde(default = "default_store")]
    pub store: String,

    pub trace_file: Option<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            debounce_ms: default_debounce_ms(),
            outputs: default_outputs(),
            store: default_store(),
            trace_file: None,
        }
    }
}

impl CaptureConfig {
    pub fn scheduler(&self) -> CaptureScheduler {
        CaptureScheduler::new(
            Duration::from_millis(self.initial_delay_ms),
            Duration::from_millis(self.debounce_ms),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider")]
    pub name: String,

    pub model: Option<String>,

    /// Required for testleaf, optional override for the others.
    pub endpoint: Option<String>,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_engine")]
    pub engine: String,

    #[serde(default)]
    pub api_keys: ApiKeys,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider(),
            model: None,
            endpoint: None,
            language: default_language(),
            engine: default_engine(),
            api_keys: ApiKeys::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeys {
    pub openai: Option<String>,
    pub groq: Option<String>,
    pub testleaf: Option<String>,
}

// Serde default helpers
fn default_initial_delay_ms() -> u64 { 500 }
fn default_debounce_ms() -> u64 { 1000 }
fn default_outputs() -> Vec<CaptureOutput> { vec![CaptureOutput::Labels, CaptureOutput::Metadata] }
fn default_store() -> String { "screen-store.json".to_string() }
fn default_provider() -> String { "openai".to_string() }
fn default_language() -> String { "TypeScript".to_string() }
fn default_engine() -> String { "chromium".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("dom-testgen.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = config_path, error = %e, "ignoring malformed config");
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// API key for a provider: config file first, then the provider's
/// environment variable.
pub fn resolve_api_key(config: &ProviderConfig, kind: ProviderKind) -> Option<String> {
    let from_config = match kind {
        ProviderKind::Openai => config.api_keys.openai.clone(),
        ProviderKind::Groq => config.api_keys.groq.clone(),
        ProviderKind::Testleaf => config.api_keys.testleaf.clone(),
        ProviderKind::Ollama | ProviderKind::Mock => None,
    };

    from_config
        .filter(|k| !k.trim().is_empty())
        .or_else(|| kind.api_key_env().and_then(|var| std::env::var(var).ok()))
}

/// Provider settings from a CLI override and the config file. An unknown
/// provider name in the config is reported as an error rather than guessed.
pub fn build_provider_settings(
    cli_provider: Option<ProviderKind>,
    config: &ProviderConfig,
) -> Result<ProviderSettings, crate::error::ProviderError> {
    let kind = match cli_provider {
        Some(kind) => kind,
        None => ProviderKind::from_name(&config.name)?,
    };

    Ok(ProviderSettings {
        kind,
        api_key: resolve_api_key(config, kind),
        endpoint: config.endpoint.clone(),
    })
}

/// Model: CLI flag, then config, then the provider default.
pub fn resolve_model(cli_model: Option<&str>, config: &ProviderConfig, kind: ProviderKind) -> String {
    cli_model
        .map(str::to_string)
        .or_else(|| config.model.clone())
        .unwrap_or_else(|| kind.default_model().to_string())
}
