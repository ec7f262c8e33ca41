use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::capture::capture_model::{
    CURRENT_SCREEN_ELEMENTS_KEY, SCREEN_ELEMENTS_META_KEY, ScreenElement,
};
use crate::error::StoreError;

/// Key-value persistence for captured screen data.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace every given key in one write.
    fn set_all(&mut self, entries: Vec<(String, Value)>) -> Result<(), StoreError>;

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.set_all(vec![(key.to_string(), value)])
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set_all` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set_all(&mut self, entries: Vec<(String, Value)>) -> Result<(), StoreError> {
        self.writes += 1;
        self.values.extend(entries);
        Ok(())
    }
}

fn get_typed<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    store
        .get(key)?
        .map(|value| {
            serde_json::from_value(value).map_err(|source| StoreError::Decode {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
}

/// Captured metadata records; empty when nothing was captured yet.
pub fn load_screen_elements(store: &dyn KeyValueStore) -> Result<Vec<ScreenElement>, StoreError> {
    Ok(get_typed(store, SCREEN_ELEMENTS_META_KEY)?.unwrap_or_default())
}

/// Legacy string list; empty when nothing was captured yet.
pub fn load_screen_labels(store: &dyn KeyValueStore) -> Result<Vec<String>, StoreError> {
    Ok(get_typed(store, CURRENT_SCREEN_ELEMENTS_KEY)?.unwrap_or_default())
}
