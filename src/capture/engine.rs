use serde_json::Value;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::capture::capture_model::{CaptureOutput, CaptureSnapshot};
use crate::capture::scanner::{describe_screen, scan};
use crate::capture::scheduler::{CaptureScheduler, Trigger};
use crate::dom::dom_model::Document;
use crate::error::StoreError;
use crate::store::kv_store::KeyValueStore;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::CaptureTraceEvent;

/// Debounced scan-and-persist loop for one page.
pub struct CaptureEngine {
    scheduler: CaptureScheduler,
    outputs: Vec<CaptureOutput>,
    tracer: TraceLogger,
    passes: u64,
}

impl CaptureEngine {
    pub fn new(scheduler: CaptureScheduler, outputs: Vec<CaptureOutput>) -> Self {
        Self {
            scheduler,
            outputs,
            tracer: TraceLogger::disabled(),
            passes: 0,
        }
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn scheduler(&self) -> &CaptureScheduler {
        &self.scheduler
    }

    /// Completed capture passes.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn on_trigger(&mut self, trigger: Trigger, now: Instant) {
        self.scheduler.trigger(trigger, now);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Run a pass if the debounce timer has expired.
    pub fn tick(
        &mut self,
        now: Instant,
        doc: &Document,
        store: &mut dyn KeyValueStore,
    ) -> Option<CaptureSnapshot> {
        if !self.scheduler.begin_scan(now) {
            return None;
        }
        let snapshot = self.run_pass(doc, store);
        self.scheduler.finish_scan(now);
        Some(snapshot)
    }

    /// Run a pass immediately, bypassing the timer.
    pub fn capture_now(&mut self, doc: &Document, store: &mut dyn KeyValueStore) -> CaptureSnapshot {
        self.run_pass(doc, store)
    }

    fn run_pass(&mut self, doc: &Document, store: &mut dyn KeyValueStore) -> CaptureSnapshot {
        let started = Instant::now();
        let snapshot = scan(doc);
        let elapsed = started.elapsed();
        self.passes += 1;

        let mut event = CaptureTraceEvent::now(self.passes, &snapshot)
            .with_url(doc.url.as_deref())
            .with_scan_time(elapsed);

        match render_outputs(doc, &snapshot, &self.outputs) {
            Ok(entries) => {
                event = event.with_keys(&entries);
                // A failed write is not retried; the next trigger overwrites anyway.
                if let Err(e) = store.set_all(entries) {
                    warn!(error = %e, "failed to persist capture");
                    event = event.with_write_error(e);
                } else {
                    info!(
                        pass = self.passes,
                        elements = snapshot.len(),
                        "stored screen elements"
                    );
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to encode capture");
                event = event.with_write_error(e);
            }
        }

        self.tracer.log(&event);
        debug!(fingerprint = %event.fingerprint, "capture pass done");
        snapshot
    }
}

/// Store entries for the configured output shapes. When two shapes share a
/// key the later one wins.
pub fn render_outputs(
    doc: &Document,
    snapshot: &CaptureSnapshot,
    outputs: &[CaptureOutput],
) -> Result<Vec<(String, Value)>, StoreError> {
    let mut entries: Vec<(String, Value)> = Vec::new();

    for output in outputs {
        let key = output.key();
        let encoded = match output {
            CaptureOutput::Labels => serde_json::to_value(snapshot.unique_labels()),
            CaptureOutput::Descriptions => serde_json::to_value(describe_screen(doc)),
            CaptureOutput::Metadata => serde_json::to_value(snapshot),
        }
        .map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;

        entries.retain(|(k, _)| k != key);
        entries.push((key.to_string(), encoded));
    }

    Ok(entries)
}
