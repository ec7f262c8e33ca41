use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::capture::capture_model::CaptureSnapshot;

/// One line of the capture trace file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureTraceEvent {
    pub timestamp_ms: u64,
    pub pass: u64,

    pub url: Option<String>,
    pub element_count: usize,
    pub fingerprint: String,

    pub keys: Vec<String>,
    pub scan_us: u64,
    pub write_error: Option<String>,
}

impl CaptureTraceEvent {
    pub fn now(pass: u64, snapshot: &CaptureSnapshot) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
                .unwrap_or_default(),
            pass,
            url: None,
            element_count: snapshot.len(),
            fingerprint: snapshot.fingerprint(),
            keys: vec![],
            scan_us: 0,
            write_error: None,
        }
    }

    pub fn with_url(mut self, url: Option<&str>) -> Self {
        self.url = url.map(str::to_string);
        self
    }

    pub fn with_keys(mut self, keys: &[(String, serde_json::Value)]) -> Self {
        self.keys = keys.iter().map(|(k, _)| k.clone()).collect();
        self
    }

    pub fn with_scan_time(mut self, elapsed: std::time::Duration) -> Self {
        self.scan_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_write_error(mut self, error: impl ToString) -> Self {
        self.write_error = Some(error.to_string());
        self
    }
}
