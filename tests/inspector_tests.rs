mod common;

use std::io::{BufReader, Cursor, Read, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use common::utils::load_fixture;
use dom_testgen::capture::capture_model::CaptureOutput;
use dom_testgen::capture::engine::CaptureEngine;
use dom_testgen::capture::scheduler::CaptureScheduler;
use dom_testgen::cli::commands::run_message_loop;
use dom_testgen::dom::dom_model::{Document, NodeId};
use dom_testgen::dom::html::parse_html;
use dom_testgen::inspector::inspector::{ElementInspector, HIGHLIGHT_CLASS, SELECTED_CLASS};
use dom_testgen::messaging::message::{PointerEvent, Reply, Request, Response};
use dom_testgen::messaging::page_context::PageContext;
use dom_testgen::store::kv_store::{MemoryStore, load_screen_elements};
use serde_json::{Value, json};

const PAGE: &str = r#"<html><body>
    <div id="card"><p>Intro <b>bold</b></p></div>
    <section><em>loose</em></section>
    <a href="/next">Next</a>
</body></html>"#;

fn page() -> Document {
    parse_html(PAGE, None)
}

fn id_of(doc: &Document, tag: &str) -> NodeId {
    doc.nodes_with_tag(tag).next().map(|(id, _)| id).expect("tag present")
}

fn context() -> PageContext {
    let engine = CaptureEngine::new(
        CaptureScheduler::new(Duration::ZERO, Duration::from_millis(20)),
        vec![CaptureOutput::Metadata],
    );
    PageContext::new(page(), engine, Box::new(MemoryStore::new()))
}

// =========================================================================
// Element inspector
// =========================================================================

#[test]
fn toggle_flips_activity() {
    let mut inspector = ElementInspector::new();

    assert!(inspector.toggle().is_active);
    let state = inspector.toggle();
    assert!(!state.is_active);
    assert!(!state.has_content);
}

#[test]
fn click_selects_closest_selectable_ancestor() {
    let doc = page();
    let mut inspector = ElementInspector::new();
    inspector.start();

    let content = inspector.click(&doc, id_of(&doc, "b")).expect("selection changed");

    assert_eq!(inspector.selected(), &[id_of(&doc, "p")]);
    assert_eq!(content, "<p>Intro <b>bold</b></p>");
    assert!(inspector.state().has_content);
}

#[test]
fn second_click_deselects() {
    let doc = page();
    let mut inspector = ElementInspector::new();
    inspector.start();

    inspector.click(&doc, id_of(&doc, "p"));
    inspector.click(&doc, id_of(&doc, "a"));
    let content = inspector.click(&doc, id_of(&doc, "p")).unwrap();

    assert_eq!(inspector.selected(), &[id_of(&doc, "a")]);
    assert_eq!(content, r#"<a href="/next">Next</a>"#);
}

#[test]
fn click_without_selectable_ancestor_is_ignored() {
    let doc = page();
    let mut inspector = ElementInspector::new();
    inspector.start();

    assert_eq!(inspector.click(&doc, id_of(&doc, "em")), None);
    assert!(inspector.selected().is_empty());
}

#[test]
fn pointer_events_ignored_while_inactive() {
    let doc = page();
    let mut inspector = ElementInspector::new();
    let p = id_of(&doc, "p");

    inspector.mouse_over(p);
    assert_eq!(inspector.click(&doc, p), None);
    assert_eq!(inspector.highlighted(), None);
    assert!(inspector.selected().is_empty());
}

#[test]
fn highlight_and_selection_classes() {
    let doc = page();
    let mut inspector = ElementInspector::new();
    inspector.start();
    let p = id_of(&doc, "p");
    let div = id_of(&doc, "div");

    inspector.mouse_over(p);
    inspector.click(&doc, p);
    assert_eq!(inspector.classes_for(p), vec![HIGHLIGHT_CLASS, SELECTED_CLASS]);
    assert!(inspector.classes_for(div).is_empty());

    inspector.stop();
    assert_eq!(inspector.classes_for(p), vec![SELECTED_CLASS], "stop keeps the selection");

    inspector.cleanup();
    assert!(inspector.classes_for(p).is_empty());
    assert!(!inspector.is_active());
}

// =========================================================================
// Message routing
// =========================================================================

#[test]
fn toggle_request_reports_state() {
    let mut ctx = context();

    let reply = ctx.handle(Request::ToggleInspector { reset: false });
    assert_eq!(
        reply,
        Reply::now(Response::InspectorState {
            is_active: true,
            has_content: false
        })
    );
}

#[test]
fn click_pushes_selected_content_then_get_returns_it() {
    let mut ctx = context();
    ctx.handle(Request::ToggleInspector { reset: false });
    let p = id_of(ctx.document(), "p");

    let reply = ctx.handle(Request::Pointer {
        event: PointerEvent::Click,
        node: p,
    });
    assert_eq!(
        reply.response,
        Some(Response::SelectedDomContent {
            content: "<p>Intro <b>bold</b></p>".into()
        })
    );

    let reply = ctx.handle(Request::GetSelectedDom);
    assert_eq!(
        reply.response,
        Some(Response::SelectedDom {
            dom: vec!["<p>Intro <b>bold</b></p>".into()]
        })
    );

    assert_eq!(ctx.handle(Request::ClearSelection), Reply::success());
    assert!(ctx.inspector().selected().is_empty());
}

#[test]
fn reset_toggle_drops_selection() {
    let mut ctx = context();
    ctx.handle(Request::ToggleInspector { reset: false });
    let p = id_of(ctx.document(), "p");
    ctx.handle(Request::Pointer {
        event: PointerEvent::Click,
        node: p,
    });

    let reply = ctx.handle(Request::ToggleInspector { reset: true });
    assert_eq!(
        reply.response,
        Some(Response::InspectorState {
            is_active: true,
            has_content: false
        })
    );
}

#[test]
fn mutation_clears_selection_and_schedules_capture() {
    let mut ctx = context();
    ctx.handle(Request::ToggleInspector { reset: false });
    let p = id_of(ctx.document(), "p");
    ctx.handle(Request::Pointer {
        event: PointerEvent::Click,
        node: p,
    });

    let start = Instant::now();
    ctx.on_mutation(load_fixture("submit_only.html"), start);
    assert!(ctx.inspector().selected().is_empty());
    assert!(ctx.tick(start).is_none());

    let snapshot = ctx.tick(start + Duration::from_millis(20)).expect("debounced pass");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(load_screen_elements(ctx.store()).unwrap()[0].label, "submit");
}

#[test]
fn debounced_capture_answers_later() {
    let mut ctx = context();
    let reply = ctx.handle(Request::CaptureNow { debounced: true });
    assert_eq!(reply, Reply::later());
    assert!(ctx.engine().next_deadline().is_some());
}

#[test]
fn wire_format_uses_type_tags() {
    let request: Request =
        serde_json::from_str(r#"{"type":"POINTER","event":"click","node":3}"#).unwrap();
    assert_eq!(
        request,
        Request::Pointer {
            event: PointerEvent::Click,
            node: 3
        }
    );

    let toggle: Request = serde_json::from_str(r#"{"type":"TOGGLE_INSPECTOR"}"#).unwrap();
    assert_eq!(toggle, Request::ToggleInspector { reset: false });

    let response = serde_json::to_value(Response::InspectorState {
        is_active: true,
        has_content: false,
    })
    .unwrap();
    assert_eq!(
        response,
        json!({"type": "INSPECTOR_STATE", "isActive": true, "hasContent": false})
    );
}

// =========================================================================
// JSON-lines message loop
// =========================================================================

fn run(ctx: &mut PageContext, input: &str) -> Vec<Value> {
    let mut output = Vec::new();
    run_message_loop(ctx, Cursor::new(input.as_bytes().to_vec()), &mut output).unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn message_loop_answers_each_line() {
    let mut ctx = context();
    let input = concat!(
        r#"{"type":"TOGGLE_INSPECTOR"}"#,
        "\n",
        "\n",
        "not json\n",
        r#"{"type":"CAPTURE_NOW"}"#,
        "\n",
    );

    let responses = run(&mut ctx, input);

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["type"], "INSPECTOR_STATE");
    assert_eq!(responses[1]["type"], "ERROR");
    assert_eq!(responses[2]["type"], "CAPTURED");
    assert_eq!(responses[2]["elements"], 2);
    assert!(!ctx.inspector().is_active(), "disconnect cleans up");
}

#[test]
fn message_loop_flushes_pending_capture_at_end_of_input() {
    let mut ctx = context();

    let responses = run(&mut ctx, "{\"type\":\"CAPTURE_NOW\",\"debounced\":true}\n");

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["type"], "CAPTURED");
    assert_eq!(responses[0]["elements"], 2);
    assert_eq!(ctx.engine().passes(), 1);
    assert_eq!(load_screen_elements(ctx.store()).unwrap()[0].label, "next");
}

/// Input side of a client that keeps its end open until it drops the sender.
struct OpenInput {
    chunks: Receiver<Vec<u8>>,
    pending: Vec<u8>,
}

impl Read for OpenInput {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.pending.is_empty() {
            match self.chunks.recv() {
                Ok(chunk) => self.pending = chunk,
                Err(_) => return Ok(0),
            }
        }
        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        Ok(n)
    }
}

/// Output side that forwards every write to the client.
struct ClientOutput(Sender<Vec<u8>>);

impl Write for ClientOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let _ = self.0.send(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn message_loop_answers_debounced_capture_while_input_stays_open() {
    let mut ctx = context();
    let (input_tx, input_rx) = mpsc::channel::<Vec<u8>>();
    let (output_tx, output_rx) = mpsc::channel::<Vec<u8>>();

    let client = std::thread::spawn(move || {
        input_tx
            .send(b"{\"type\":\"CAPTURE_NOW\",\"debounced\":true}\n".to_vec())
            .unwrap();

        let mut received = String::new();
        let deadline = Instant::now() + Duration::from_secs(5);
        while !received.contains("CAPTURED") {
            let left = deadline.saturating_duration_since(Instant::now());
            match output_rx.recv_timeout(left) {
                Ok(chunk) => received.push_str(&String::from_utf8_lossy(&chunk)),
                Err(_) => break,
            }
        }
        // Closing the input only after the answer (or the timeout) arrived.
        drop(input_tx);
        received
    });

    let reader = BufReader::new(OpenInput {
        chunks: input_rx,
        pending: Vec::new(),
    });
    run_message_loop(&mut ctx, reader, &mut ClientOutput(output_tx)).unwrap();

    let received = client.join().unwrap();
    assert!(
        received.contains("\"type\":\"CAPTURED\""),
        "answer must arrive before the client closes its input, got {received:?}"
    );
    assert_eq!(ctx.engine().passes(), 1);
}

struct BrokenRead;

impl Read for BrokenRead {
    fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("connection reset"))
    }
}

#[test]
fn message_loop_read_failure_still_cleans_up() {
    let mut ctx = context();
    let input = Cursor::new(b"{\"type\":\"TOGGLE_INSPECTOR\"}\n".to_vec()).chain(BrokenRead);
    let mut output = Vec::new();

    let result = run_message_loop(&mut ctx, BufReader::new(input), &mut output);

    assert!(result.is_err());
    assert!(String::from_utf8(output).unwrap().contains("INSPECTOR_STATE"));
    assert!(!ctx.inspector().is_active(), "disconnect cleanup runs on error");
}
