mod common;

use clap::Parser;
use common::utils::fixture;
use dom_testgen::capture::capture_model::CaptureOutput;
use dom_testgen::cli::commands::{cmd_capture, cmd_match, cmd_patch, cmd_prompt, cmd_watch};
use dom_testgen::cli::config::{
    AppConfig, Cli, Commands, ProviderConfig, build_provider_settings, load_config,
    resolve_api_key, resolve_model,
};
use dom_testgen::error::{AppError, ProviderError};
use dom_testgen::logging::filter_for_verbosity;
use dom_testgen::provider::llm_provider::ProviderKind;
use dom_testgen::store::file_store::JsonFileStore;
use dom_testgen::store::kv_store::load_screen_labels;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_capture_minimal() {
    let cli = Cli::parse_from(["dom-testgen", "capture", "--page", "login.html"]);
    match cli.command {
        Commands::Capture { page, output } => {
            assert_eq!(page, "login.html");
            assert!(output.is_empty(), "config outputs apply when none given");
        }
        _ => panic!("Expected Capture command"),
    }
    assert_eq!(cli.verbose, 0);
    assert!(cli.store.is_none());
}

#[test]
fn cli_parse_capture_outputs_and_globals() {
    let cli = Cli::parse_from([
        "dom-testgen",
        "-vv",
        "--store",
        "out.json",
        "capture",
        "--page",
        "p.json",
        "--output",
        "labels",
        "--output",
        "descriptions",
    ]);
    match cli.command {
        Commands::Capture { output, .. } => {
            assert_eq!(output, vec![CaptureOutput::Labels, CaptureOutput::Descriptions]);
        }
        _ => panic!("Expected Capture command"),
    }
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.store.as_deref(), Some("out.json"));
}

#[test]
fn cli_parse_watch_defaults() {
    let cli = Cli::parse_from(["dom-testgen", "watch", "--page", "p.html"]);
    match cli.command {
        Commands::Watch {
            page,
            poll_ms,
            max_scans,
        } => {
            assert_eq!(page, "p.html");
            assert_eq!(poll_ms, 100);
            assert_eq!(max_scans, None);
        }
        _ => panic!("Expected Watch command"),
    }
}

#[test]
fn cli_parse_generate() {
    let cli = Cli::parse_from([
        "dom-testgen",
        "generate",
        "--scenario",
        "log in",
        "--provider",
        "groq",
        "--model",
        "m1",
    ]);
    match cli.command {
        Commands::Generate {
            scenario,
            output_type,
            provider,
            model,
        } => {
            assert_eq!(scenario, "log in");
            assert_eq!(output_type, "Playwright test");
            assert_eq!(provider, Some(ProviderKind::Groq));
            assert_eq!(model.as_deref(), Some("m1"));
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn cli_prompt_requires_kind_unless_listing() {
    assert!(Cli::try_parse_from(["dom-testgen", "prompt"]).is_err());
    assert!(Cli::try_parse_from(["dom-testgen", "prompt", "--list"]).is_ok());

    let cli = Cli::parse_from([
        "dom-testgen",
        "prompt",
        "--kind",
        "CUCUMBER_ONLY",
        "--var",
        "userAction=log in",
        "--var",
        "pageUrl=https://x.test",
    ]);
    match cli.command {
        Commands::Prompt { kind, vars, list } => {
            assert_eq!(kind.as_deref(), Some("CUCUMBER_ONLY"));
            assert_eq!(vars.len(), 2);
            assert!(!list);
        }
        _ => panic!("Expected Prompt command"),
    }
}

#[test]
fn cli_rejects_unknown_output_shape() {
    assert!(Cli::try_parse_from(["dom-testgen", "capture", "--page", "p", "--output", "xml"]).is_err());
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn config_defaults_when_missing() {
    let config = load_config(Some("/nonexistent/dom-testgen.yaml"));
    assert_eq!(config.capture.initial_delay_ms, 500);
    assert_eq!(config.capture.debounce_ms, 1000);
    assert_eq!(
        config.capture.outputs,
        vec![CaptureOutput::Labels, CaptureOutput::Metadata]
    );
    assert_eq!(config.capture.store, "screen-store.json");
    assert_eq!(config.provider.name, "openai");
    assert_eq!(config.provider.language, "TypeScript");
}

#[test]
fn config_partial_yaml_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dom-testgen.yaml");
    std::fs::write(
        &path,
        "capture:\n  debounce_ms: 250\n  outputs: [descriptions]\nprovider:\n  name: ollama\n  model: llama3\n",
    )
    .unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.capture.debounce_ms, 250);
    assert_eq!(config.capture.initial_delay_ms, 500);
    assert_eq!(config.capture.outputs, vec![CaptureOutput::Descriptions]);
    assert_eq!(config.provider.name, "ollama");
    assert_eq!(config.provider.model.as_deref(), Some("llama3"));
}

#[test]
fn config_malformed_yaml_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "capture: [unclosed").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.capture.debounce_ms, 1000);
}

#[test]
fn api_key_from_config_wins() {
    let mut provider = ProviderConfig::default();
    provider.api_keys.groq = Some("from-config".into());
    assert_eq!(
        resolve_api_key(&provider, ProviderKind::Groq).as_deref(),
        Some("from-config")
    );
    assert_eq!(resolve_api_key(&provider, ProviderKind::Mock), None);
}

#[test]
fn provider_settings_cli_overrides_config() {
    let provider = ProviderConfig {
        name: "testleaf".into(),
        endpoint: Some("https://llm.internal.test/v1/chat".into()),
        ..ProviderConfig::default()
    };

    let settings = build_provider_settings(Some(ProviderKind::Mock), &provider).unwrap();
    assert_eq!(settings.kind, ProviderKind::Mock);

    let settings = build_provider_settings(None, &provider).unwrap();
    assert_eq!(settings.kind, ProviderKind::Testleaf);
    assert_eq!(settings.endpoint.as_deref(), Some("https://llm.internal.test/v1/chat"));

    let unknown = ProviderConfig {
        name: "bard".into(),
        ..ProviderConfig::default()
    };
    assert!(matches!(
        build_provider_settings(None, &unknown),
        Err(ProviderError::Unsupported(_))
    ));
}

#[test]
fn model_resolution_order() {
    let mut provider = ProviderConfig::default();
    assert_eq!(resolve_model(None, &provider, ProviderKind::Groq), "llama-3.3-70b-versatile");

    provider.model = Some("from-config".into());
    assert_eq!(resolve_model(None, &provider, ProviderKind::Groq), "from-config");
    assert_eq!(resolve_model(Some("cli"), &provider, ProviderKind::Groq), "cli");
}

#[test]
fn verbosity_maps_to_filter() {
    assert_eq!(filter_for_verbosity(0), "dom_testgen=warn");
    assert_eq!(filter_for_verbosity(1), "dom_testgen=info");
    assert_eq!(filter_for_verbosity(7), "dom_testgen=trace");
}

// ============================================================================
// Command Tests
// ============================================================================

#[test]
fn capture_then_match_and_patch_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("store.json"));
    let config = AppConfig::default();
    let page = fixture("login.html");

    let snapshot = cmd_capture(page.to_str().unwrap(), &[], &config, &mut store).unwrap();
    assert_eq!(snapshot.len(), 7);
    assert_eq!(load_screen_labels(&store).unwrap()[0], "email");

    let found = cmd_match("type the Username", &store).unwrap().expect("match");
    assert_eq!(found.selector, r#"input[name="username"]"#);
    assert!(cmd_match("nothing relevant", &store).unwrap().is_none());

    let code_path = dir.path().join("test.java");
    std::fs::write(&code_path, "By.name(\"user\") // username\n").unwrap();
    let patched = cmd_patch(code_path.to_str().unwrap(), &store).unwrap();
    assert!(patched.matched);
    assert_eq!(patched.code, "By.cssSelector('input[name=\"username\"]') // username\n");
}

#[test]
fn watch_stops_after_max_scans() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("store.json"));
    let mut config = AppConfig::default();
    config.capture.initial_delay_ms = 0;

    let page = fixture("submit_only.html");
    let passes = cmd_watch(page.to_str().unwrap(), 5, Some(1), &config, &mut store).unwrap();

    assert_eq!(passes, 1);
    assert_eq!(load_screen_labels(&store).unwrap(), vec!["submit"]);
}

#[test]
fn capture_missing_page_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("store.json"));
    let missing = dir.path().join("missing.html");

    let err = cmd_capture(missing.to_str().unwrap(), &[], &AppConfig::default(), &mut store)
        .unwrap_err();
    assert!(matches!(err, AppError::Dom(_)));
}

#[test]
fn prompt_rejects_malformed_var() {
    let err = cmd_prompt(Some("CUCUMBER_ONLY"), &["novalue".to_string()], false).unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));

    let err = cmd_prompt(Some("NOPE"), &[], false).unwrap_err();
    assert_eq!(err.to_string(), "Prompt not found: NOPE");
}
