//! Key-value storage blob
//!
//! A single JSON object on disk maps string keys to JSON values. Every write
//! replaces the whole file; reads of a value that no longer matches the
//! expected shape are reported as absent so callers can fall back.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::AtlasError;

use super::file_io::{read_json_lenient, write_json_atomic};

pub struct KeyValueStore {
    path: PathBuf,
    entries: RwLock<Map<String, Value>>,
}

impl KeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: RwLock::new(Map::new()),
        }
    }

    /// Load the blob from disk, replacing anything held in memory
    pub fn load(&self) -> Result<(), AtlasError> {
        let file_data: Map<String, Value> = read_json_lenient(&self.path)?;

        let mut entries = self
            .entries
            .write()
            .map_err(|e| AtlasError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *entries = file_data;
        Ok(())
    }

    fn persist(&self, entries: &Map<String, Value>) -> Result<(), AtlasError> {
        write_json_atomic(&self.path, entries)
    }

    /// Raw JSON stored under a key
    pub fn get_raw(&self, key: &str) -> Result<Option<Value>, AtlasError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| AtlasError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.get(key).cloned())
    }

    /// Typed value stored under a key; a value of the wrong shape reads as `None`
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AtlasError> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(None);
        };

        match serde_json::from_value(raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "stored value has an unexpected shape");
                Ok(None)
            }
        }
    }

    /// Store raw JSON under a key and write the blob to disk
    pub fn set_raw(&self, key: &str, value: Value) -> Result<(), AtlasError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| AtlasError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        entries.insert(key.to_string(), value);
        self.persist(&entries)
    }

    /// Serialize a value under a key and write the blob to disk
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AtlasError> {
        let raw = serde_json::to_value(value)?;
        self.set_raw(key, raw)
    }
}
