//! Options store - cached wrapper over one named options mapping
//!
//! The cache is reloaded from the backend after every successful write so the
//! writer's next read sees what was persisted. Writers in other processes are
//! not coordinated against.

use super::repository::OptionsBackend;
use super::validation::sanitize_key;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::sync::Arc;

pub type OptionsMap = Map<String, Value>;

/// Cached view over a persisted options mapping
///
/// A store built with a name that sanitizes to "" is inert: reads return
/// `None` and writes return `false`.
pub struct OptionsStore {
    name: String,
    defaults: OptionsMap,
    backend: Arc<dyn OptionsBackend>,
    values: RwLock<OptionsMap>,
}

impl OptionsStore {
    /// Create a store and load its current values, falling back to `defaults`
    pub fn new(name: &str, defaults: OptionsMap, backend: Arc<dyn OptionsBackend>) -> Self {
        let safe_name = sanitize_key(name);
        if safe_name.is_empty() {
            tracing::warn!(
                target: "settings_pages::misconfig",
                name = %name,
                "Invalid options name specified, store is inert"
            );
        }

        let store = Self {
            name: safe_name,
            defaults,
            backend,
            values: RwLock::new(OptionsMap::new()),
        };
        store.refresh();
        store
    }

    /// Sanitized storage name, "" when inert
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_inert(&self) -> bool {
        self.name.is_empty()
    }

    /// Single value, `None` when absent or inert
    pub fn get(&self, key: &str) -> Option<Value> {
        if self.is_inert() {
            return None;
        }
        self.values.read().get(key).cloned()
    }

    /// Whole mapping, `None` when inert
    pub fn get_all(&self) -> Option<OptionsMap> {
        if self.is_inert() {
            return None;
        }
        Some(self.values.read().clone())
    }

    /// Set one entry
    ///
    /// Persists immediately unless `deferred`. A deferred set only updates the
    /// cache and returns `false`; the caller flushes with [`save`](Self::save).
    pub fn set(&self, key: &str, value: Value, deferred: bool) -> bool {
        if self.is_inert() || key.is_empty() {
            return false;
        }
        self.values.write().insert(key.to_string(), value);
        if deferred {
            return false;
        }
        self.persist_and_refresh()
    }

    /// Replace the whole mapping and persist it
    pub fn set_all(&self, values: OptionsMap) -> bool {
        if self.is_inert() {
            return false;
        }
        *self.values.write() = values;
        self.persist_and_refresh()
    }

    /// Reload the cache from the backend, using the defaults when nothing is stored
    pub fn refresh(&self) -> bool {
        if self.is_inert() {
            return false;
        }

        let loaded = match self.backend.get(&self.name) {
            Ok(Some(Value::Object(values))) => values,
            Ok(Some(other)) => {
                tracing::warn!(
                    option = %self.name,
                    kind = %value_kind(&other),
                    "Stored options value is not a mapping, using defaults"
                );
                self.defaults.clone()
            }
            Ok(None) => self.defaults.clone(),
            Err(e) => {
                tracing::warn!(option = %self.name, error = %e, "Failed to load options");
                return false;
            }
        };

        *self.values.write() = loaded;
        true
    }

    /// Persist the cached mapping
    pub fn save(&self) -> bool {
        if self.is_inert() {
            return false;
        }

        let snapshot = Value::Object(self.values.read().clone());
        match self.backend.put(&self.name, &snapshot) {
            Ok(()) => {
                tracing::debug!(option = %self.name, "Saved options");
                true
            }
            Err(e) => {
                tracing::warn!(option = %self.name, error = %e, "Failed to save options");
                false
            }
        }
    }

    fn persist_and_refresh(&self) -> bool {
        if !self.save() {
            return false;
        }
        // Pick up anything another writer persisted alongside this one
        self.refresh();
        true
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
