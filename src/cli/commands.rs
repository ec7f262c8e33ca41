use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant, SystemTime};

use tracing::{debug, info, warn};

use crate::capture::capture_model::{CaptureOutput, CaptureSnapshot, ScreenElement};
use crate::capture::engine::CaptureEngine;
use crate::capture::scheduler::Trigger;
use crate::cli::config::{AppConfig, build_provider_settings, resolve_model};
use crate::dom::html::load_document;
use crate::error::AppError;
use crate::generate::scenario::{GenerationOutcome, ScenarioRequest, ScreenContext, generate_scenario};
use crate::matcher::fuzzy::match_element;
use crate::matcher::patcher::{PatchResult, patch};
use crate::messaging::message::{Request, Response};
use crate::messaging::page_context::PageContext;
use crate::prompt::render::get_prompt;
use crate::prompt::templates::PromptKind;
use crate::provider::llm_provider::{ProviderKind, build_provider};
use crate::store::file_store::JsonFileStore;
use crate::store::kv_store::{load_screen_elements, load_screen_labels};
use crate::trace::logger::TraceLogger;

pub fn open_store(cli_store: Option<&str>, config: &AppConfig) -> JsonFileStore {
    JsonFileStore::new(cli_store.unwrap_or(&config.capture.store))
}

fn build_engine(config: &AppConfig, outputs: &[CaptureOutput]) -> CaptureEngine {
    let outputs = if outputs.is_empty() {
        config.capture.outputs.clone()
    } else {
        outputs.to_vec()
    };

    let engine = CaptureEngine::new(config.capture.scheduler(), outputs);
    match &config.capture.trace_file {
        Some(path) => engine.with_tracer(TraceLogger::new(Path::new(path))),
        None => engine,
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| AppError::Io {
        context: "encoding output".into(),
        source: std::io::Error::other(e),
    })?;
    println!("{json}");
    Ok(())
}

// ============================================================================
// capture subcommand
// ============================================================================

pub fn cmd_capture(
    page: &str,
    outputs: &[CaptureOutput],
    config: &AppConfig,
    store: &mut JsonFileStore,
) -> Result<CaptureSnapshot, AppError> {
    let document = load_document(Path::new(page))?;
    let mut engine = build_engine(config, outputs);

    let snapshot = engine.capture_now(&document, store);
    print_json(&snapshot)?;
    eprintln!(
        "Captured {} elements into {}",
        snapshot.len(),
        store.path().display()
    );
    Ok(snapshot)
}

// ============================================================================
// watch subcommand
// ============================================================================

fn modified_at(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Poll the page file and re-capture on change. Returns the number of passes.
pub fn cmd_watch(
    page: &str,
    poll_ms: u64,
    max_scans: Option<u64>,
    config: &AppConfig,
    store: &mut JsonFileStore,
) -> Result<u64, AppError> {
    let path = Path::new(page);
    let mut document = load_document(path)?;
    let mut engine = build_engine(config, &[]);
    let mut last_modified = modified_at(path);

    engine.on_trigger(Trigger::PageLoad, Instant::now());
    info!(page, "watching for changes");

    loop {
        std::thread::sleep(Duration::from_millis(poll_ms));

        let modified = modified_at(path);
        if modified != last_modified {
            last_modified = modified;
            match load_document(path) {
                Ok(doc) => {
                    document = doc;
                    engine.on_trigger(Trigger::Mutation, Instant::now());
                }
                // Half-written files are common while editors save.
                Err(e) => debug!(error = %e, "page unreadable, waiting for next change"),
            }
        }

        if let Some(snapshot) = engine.tick(Instant::now(), &document, &mut *store) {
            println!(
                "pass {}: {} elements ({})",
                engine.passes(),
                snapshot.len(),
                snapshot.fingerprint()
            );
        }

        if max_scans.is_some_and(|max| engine.passes() >= max) {
            return Ok(engine.passes());
        }
    }
}

// ============================================================================
// match / patch subcommands
// ============================================================================

pub fn cmd_match(text: &str, store: &JsonFileStore) -> Result<Option<ScreenElement>, AppError> {
    let elements = load_screen_elements(store)?;
    let found = match_element(text, &elements).cloned();

    match &found {
        Some(el) => print_json(el)?,
        None => eprintln!("No captured element is mentioned in the text"),
    }
    Ok(found)
}

fn read_code(code: &str) -> Result<String, AppError> {
    if code == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| AppError::Io {
                context: "reading stdin".into(),
                source,
            })?;
        Ok(buf)
    } else {
        std::fs::read_to_string(code).map_err(|source| AppError::Io {
            context: format!("reading {code}"),
            source,
        })
    }
}

pub fn cmd_patch(code: &str, store: &JsonFileStore) -> Result<PatchResult, AppError> {
    let source = read_code(code)?;
    let elements = load_screen_elements(store)?;
    let result = patch(&source, &elements);

    print!("{}", result.code);
    if !result.matched {
        eprintln!(
            "Warning: the generated code does not mention any element on the current screen; \
             it may target elements that are not visible."
        );
    }
    Ok(result)
}

// ============================================================================
// prompt subcommand
// ============================================================================

fn parse_var(raw: &str) -> Result<(&str, &str), AppError> {
    raw.split_once('=')
        .ok_or_else(|| AppError::InvalidArgument(format!("expected name=value, got '{raw}'")))
}

pub fn cmd_prompt(kind: Option<&str>, vars: &[String], list: bool) -> Result<String, AppError> {
    if list {
        let listing = PromptKind::ALL
            .iter()
            .map(|k| format!("{:<40} {}", k.key(), k.generator_name()))
            .collect::<Vec<_>>()
            .join("\n");
        println!("{listing}");
        return Ok(listing);
    }

    let key = kind.ok_or_else(|| AppError::InvalidArgument("--kind is required".into()))?;
    let variables = vars
        .iter()
        .map(|v| parse_var(v))
        .collect::<Result<Vec<_>, _>>()?;

    let prompt = get_prompt(key, &variables)?;
    println!("{prompt}");
    Ok(prompt)
}

// ============================================================================
// generate subcommand
// ============================================================================

pub fn cmd_generate(
    scenario: &str,
    output_type: &str,
    provider: Option<ProviderKind>,
    model: Option<&str>,
    config: &AppConfig,
    store: &JsonFileStore,
) -> Result<GenerationOutcome, AppError> {
    let screen = ScreenContext {
        labels: load_screen_labels(store)?,
        elements: load_screen_elements(store)?,
    };

    let settings = build_provider_settings(provider, &config.provider);
    let kind = settings
        .as_ref()
        .map(|s| s.kind)
        .unwrap_or(ProviderKind::Mock);

    let request = ScenarioRequest {
        scenario: scenario.to_string(),
        output_type: output_type.to_string(),
        language: config.provider.language.clone(),
        engine: config.provider.engine.clone(),
        model: resolve_model(model, &config.provider, kind),
    };

    let outcome = match settings.and_then(|s| build_provider(&s)) {
        Ok(client) => generate_scenario(&request, Ok(client.as_ref()), &screen),
        Err(e) => generate_scenario(&request, Err(e), &screen),
    };

    println!("{}", outcome.content);
    if !outcome.failed && !outcome.dom_match {
        eprintln!(
            "Warning: none of the captured screen elements appear in the scenario or the \
             generated code."
        );
    }
    Ok(outcome)
}

// ============================================================================
// serve subcommand
// ============================================================================

fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<(), AppError> {
    let io = |source| AppError::Io {
        context: "writing response".into(),
        source,
    };
    let json = serde_json::to_string(response).map_err(|e| io(std::io::Error::other(e)))?;
    writeln!(writer, "{json}").map_err(io)?;
    writer.flush().map_err(io)
}

/// Answer one JSON request per input line.
///
/// Lines are read on a helper thread so capture timers fire on schedule
/// while the client is quiet. End of input counts as the port disconnecting:
/// a still-pending capture runs first. Inspector cleanup happens on every
/// exit path.
pub fn run_message_loop<R, W>(
    context: &mut PageContext,
    reader: R,
    writer: &mut W,
) -> Result<(), AppError>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let (tx, rx) = mpsc::channel::<std::io::Result<String>>();
    std::thread::spawn(move || {
        for line in reader.lines() {
            let failed = line.is_err();
            if tx.send(line).is_err() || failed {
                break;
            }
        }
    });

    let result = serve_requests(context, &rx, writer);
    context.on_port_disconnect();
    result
}

fn serve_requests<W: Write>(
    context: &mut PageContext,
    lines: &Receiver<std::io::Result<String>>,
    writer: &mut W,
) -> Result<(), AppError> {
    loop {
        let received = match context.engine().next_deadline() {
            Some(deadline) => {
                lines.recv_timeout(deadline.saturating_duration_since(Instant::now()))
            }
            None => lines.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(Ok(line)) => answer_line(context, &line, writer)?,
            Ok(Err(source)) => {
                flush_pending_capture(context, writer)?;
                return Err(AppError::Io {
                    context: "reading request".into(),
                    source,
                });
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return flush_pending_capture(context, writer),
        }

        if let Some(snapshot) = context.tick(Instant::now()) {
            write_response(writer, &PageContext::captured_response(&snapshot))?;
        }
    }
}

fn answer_line<W: Write>(
    context: &mut PageContext,
    line: &str,
    writer: &mut W,
) -> Result<(), AppError> {
    if line.trim().is_empty() {
        return Ok(());
    }

    match serde_json::from_str::<Request>(line) {
        Ok(request) => match context.handle(request).response {
            Some(response) => write_response(writer, &response),
            None => Ok(()),
        },
        Err(e) => {
            warn!(error = %e, "unreadable request");
            write_response(
                writer,
                &Response::Error {
                    error: e.to_string(),
                },
            )
        }
    }
}

fn flush_pending_capture<W: Write>(context: &mut PageContext, writer: &mut W) -> Result<(), AppError> {
    let Some(deadline) = context.engine().next_deadline() else {
        return Ok(());
    };

    std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
    match context.tick(Instant::now().max(deadline)) {
        Some(snapshot) => write_response(writer, &PageContext::captured_response(&snapshot)),
        None => Ok(()),
    }
}

pub fn cmd_serve(page: &str, config: &AppConfig, store: JsonFileStore) -> Result<(), AppError> {
    let document = load_document(Path::new(page))?;
    let engine = build_engine(config, &[]);
    let mut context = PageContext::new(document, engine, Box::new(store));

    let mut stdout = std::io::stdout();
    run_message_loop(&mut context, BufReader::new(std::io::stdin()), &mut stdout)
}
