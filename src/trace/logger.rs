use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::trace::trace::CaptureTraceEvent;

struct TraceSink {
    path: PathBuf,
    file: Mutex<File>,
}

/// JSON-lines log of capture passes. Tracing problems never fail a capture:
/// they are reported through `tracing` and the event is dropped.
#[derive(Default)]
pub struct TraceLogger {
    sink: Option<TraceSink>,
}

impl TraceLogger {
    /// Append to `path`, creating it if needed. An unopenable file leaves
    /// the logger disabled.
    pub fn new(path: &Path) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                sink: Some(TraceSink {
                    path: path.to_path_buf(),
                    file: Mutex::new(file),
                }),
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "capture trace disabled");
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|s| s.path.as_path())
    }

    pub fn log(&self, event: &CaptureTraceEvent) {
        let Some(sink) = &self.sink else {
            return;
        };

        let written = serde_json::to_string(event)
            .map_err(|e| e.to_string())
            .and_then(|line| {
                let mut file = sink.file.lock().map_err(|e| e.to_string())?;
                writeln!(file, "{line}").map_err(|e| e.to_string())
            });

        if let Err(error) = written {
            warn!(path = %sink.path.display(), %error, pass = event.pass, "dropped capture trace event");
        }
    }
}
