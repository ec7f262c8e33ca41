use std::time::Instant;

use tracing::{debug, info};

use crate::capture::capture_model::CaptureSnapshot;
use crate::capture::engine::CaptureEngine;
use crate::capture::scheduler::Trigger;
use crate::dom::dom_model::Document;
use crate::inspector::inspector::ElementInspector;
use crate::messaging::message::{PointerEvent, Reply, Request, Response};
use crate::store::kv_store::KeyValueStore;

/// Everything that lives for one inspected page. Constructed once and
/// handed to the message router by `&mut`.
pub struct PageContext {
    document: Document,
    inspector: ElementInspector,
    engine: CaptureEngine,
    store: Box<dyn KeyValueStore>,
}

impl PageContext {
    pub fn new(document: Document, engine: CaptureEngine, store: Box<dyn KeyValueStore>) -> Self {
        Self {
            document,
            inspector: ElementInspector::new(),
            engine,
            store,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn inspector(&self) -> &ElementInspector {
        &self.inspector
    }

    pub fn engine(&self) -> &CaptureEngine {
        &self.engine
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn on_page_load(&mut self, now: Instant) {
        self.engine.on_trigger(Trigger::PageLoad, now);
    }

    /// The page changed under us. Selection refers to node indices of the
    /// old document, so it is dropped.
    pub fn on_mutation(&mut self, document: Document, now: Instant) {
        self.document = document;
        self.inspector.clear_selection();
        self.engine.on_trigger(Trigger::Mutation, now);
    }

    /// Drive the capture timer.
    pub fn tick(&mut self, now: Instant) -> Option<CaptureSnapshot> {
        self.engine.tick(now, &self.document, self.store.as_mut())
    }

    /// Response for a pass that completed on the timer.
    pub fn captured_response(snapshot: &CaptureSnapshot) -> Response {
        Response::Captured {
            elements: snapshot.len(),
            fingerprint: snapshot.fingerprint(),
        }
    }

    /// The long-lived connection to the panel went away.
    pub fn on_port_disconnect(&mut self) {
        debug!("port disconnected, cleaning up inspector");
        self.inspector.cleanup();
    }

    pub fn handle(&mut self, request: Request) -> Reply {
        match request {
            Request::ToggleInspector { reset } => {
                if reset {
                    self.inspector.cleanup();
                    self.inspector = ElementInspector::new();
                }
                let state = self.inspector.toggle();
                info!(active = state.is_active, "inspector toggled");
                Reply::now(Response::InspectorState {
                    is_active: state.is_active,
                    has_content: state.has_content,
                })
            }
            Request::GetSelectedDom => Reply::now(Response::SelectedDom {
                dom: self.inspector.selected_html(&self.document),
            }),
            Request::ClearSelection => {
                self.inspector.clear_selection();
                Reply::success()
            }
            Request::Cleanup => {
                self.inspector.cleanup();
                Reply::success()
            }
            Request::Pointer { event, node } => match event {
                PointerEvent::Over => {
                    self.inspector.mouse_over(node);
                    Reply::none()
                }
                PointerEvent::Out => {
                    self.inspector.mouse_out();
                    Reply::none()
                }
                PointerEvent::Click => match self.inspector.click(&self.document, node) {
                    Some(content) => Reply::now(Response::SelectedDomContent { content }),
                    None => Reply::none(),
                },
            },
            Request::CaptureNow { debounced: true } => {
                self.engine.on_trigger(Trigger::Mutation, Instant::now());
                Reply::later()
            }
            Request::CaptureNow { debounced: false } => {
                let snapshot = self.engine.capture_now(&self.document, self.store.as_mut());
                Reply::now(Self::captured_response(&snapshot))
            }
        }
    }
}
