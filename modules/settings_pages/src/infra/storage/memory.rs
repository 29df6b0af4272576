//! In-memory options backend

use crate::domain::repository::OptionsBackend;
use anyhow::Result;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

/// Options backend kept in process memory
#[derive(Default)]
pub struct MemoryBackend {
    data: RwLock<HashMap<String, Value>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-populated with `(name, value)` pairs
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            data: RwLock::new(values.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    /// Current stored value for `name`
    pub fn snapshot(&self, name: &str) -> Option<Value> {
        self.data.read().get(name).cloned()
    }

    /// Stored names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.data.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl OptionsBackend for MemoryBackend {
    fn get(&self, name: &str) -> Result<Option<Value>> {
        Ok(self.data.read().get(name).cloned())
    }

    fn put(&self, name: &str, value: &Value) -> Result<()> {
        self.data.write().insert(name.to_string(), value.clone());
        Ok(())
    }
}
