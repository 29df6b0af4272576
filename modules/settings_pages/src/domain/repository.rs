//! Persistence trait for options mappings
//!
//! One value is stored per sanitized name. Implementations are in
//! infra/storage.

use anyhow::Result;
use serde_json::Value;

/// Key-value persistence for named options mappings
pub trait OptionsBackend: Send + Sync {
    /// Load the value stored under `name`, `None` when nothing is stored
    fn get(&self, name: &str) -> Result<Option<Value>>;

    /// Store `value` under `name`, replacing any previous value
    fn put(&self, name: &str, value: &Value) -> Result<()>;
}
