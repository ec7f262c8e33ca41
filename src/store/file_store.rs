use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;
use crate::store::kv_store::KeyValueStore;

/// JSON object on disk, one entry per key. Writes go to a sibling temp file
/// that is renamed over the original, so readers see either the old or the
/// new object.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(self.io_err(e)),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_all(&mut self, entries: Vec<(String, Value)>) -> Result<(), StoreError> {
        let mut all = self.read_all()?;
        let keys: Vec<String> = entries.iter().map(|(k, _)| k.clone()).collect();
        all.extend(entries);

        let json = serde_json::to_string_pretty(&Value::Object(all)).map_err(|source| {
            StoreError::Encode {
                key: keys.join(","),
                source,
            }
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| self.io_err(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))?;

        debug!(path = %self.path.display(), ?keys, "store written");
        Ok(())
    }
}
