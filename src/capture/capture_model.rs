use serde::{Deserialize, Serialize};

use crate::capture::selector::is_text_fallback;

/// Store key for the legacy shape: a list of strings.
pub const CURRENT_SCREEN_ELEMENTS_KEY: &str = "currentScreenElements";
/// Store key for the metadata shape: a list of [`ScreenElement`] records.
pub const SCREEN_ELEMENTS_META_KEY: &str = "screenElementsMeta";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenElement {
    /// Lower-cased, never empty.
    pub label: String,
    pub tag: String,
    pub selector: String,
}

impl ScreenElement {
    pub fn has_resolvable_selector(&self) -> bool {
        !is_text_fallback(&self.selector)
    }
}

/// Result of one full-document scan, in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaptureSnapshot {
    pub elements: Vec<ScreenElement>,
}

impl CaptureSnapshot {
    pub fn new(elements: Vec<ScreenElement>) -> Self {
        Self { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Lower-cased labels with duplicates removed, first occurrence kept.
    pub fn unique_labels(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.elements
            .iter()
            .filter(|e| seen.insert(e.label.as_str()))
            .map(|e| e.label.clone())
            .collect()
    }

    /// SHA-1 over labels, tags and selectors in order.
    pub fn fingerprint(&self) -> String {
        use sha1::{Digest, Sha1};

        let mut hasher = Sha1::new();
        for el in &self.elements {
            hasher.update(el.tag.as_bytes());
            hasher.update([0u8]);
            hasher.update(el.label.as_bytes());
            hasher.update([0u8]);
            hasher.update(el.selector.as_bytes());
            hasher.update([0xffu8]);
        }
        format!("{:x}", hasher.finalize())
    }
}

/// Which value shapes a capture pass persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CaptureOutput {
    /// Deduplicated lower-cased labels under `currentScreenElements`.
    Labels,
    /// Role-phrased descriptions under `currentScreenElements`.
    Descriptions,
    /// Full records under `screenElementsMeta`.
    Metadata,
}

impl CaptureOutput {
    pub fn key(&self) -> &'static str {
        match self {
            CaptureOutput::Labels | CaptureOutput::Descriptions => CURRENT_SCREEN_ELEMENTS_KEY,
            CaptureOutput::Metadata => SCREEN_ELEMENTS_META_KEY,
        }
    }
}
