//! JSON file options backend
//!
//! All options mappings live in one JSON document `{ name: value, ... }`.
//! Writes go to a temporary file in the same directory which is then renamed
//! over the document.

use crate::domain::repository::OptionsBackend;
use anyhow::Result;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Error type for the file backend
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to access options file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Options file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Options file {0} does not contain a JSON object")]
    NotAnObject(PathBuf),
}

/// Options backend persisting to a single JSON document
pub struct JsonFileBackend {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, Value>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&raw) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(_) => Err(StorageError::NotAnObject(self.path.clone())),
            Err(source) => Err(StorageError::Parse {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(io_err)?;
        let body = serde_json::to_vec_pretty(document).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })?;
        tmp.write_all(&body).map_err(io_err)?;
        tmp.flush().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl OptionsBackend for JsonFileBackend {
    fn get(&self, name: &str) -> Result<Option<Value>> {
        Ok(self.read_document()?.get(name).cloned())
    }

    fn put(&self, name: &str, value: &Value) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut document = self.read_document()?;
        document.insert(name.to_string(), value.clone());
        self.write_document(&document)?;
        tracing::debug!(path = %self.path.display(), option = %name, "Wrote options file");
        Ok(())
    }
}
