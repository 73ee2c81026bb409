use crate::error::{PrefsError, PrefsResult};
use crate::storage::Storage;
use crate::value::Value;
use log::debug;
use sled::Db;
use std::path::Path;

/// Restart-durable preferences on an embedded Sled database
pub struct SledStore {
    db: Db,
    flush_on_write: bool,
}

impl SledStore {
    pub fn new(path: &Path) -> PrefsResult<Self> {
        Self::with_flush(path, true)
    }

    /// Open the store, choosing whether every write is flushed before returning.
    pub fn with_flush(path: &Path, flush_on_write: bool) -> PrefsResult<Self> {
        let db = sled::open(path).map_err(|e| {
            PrefsError::Storage(format!("Failed to open Sled database at {:?}: {}", path, e))
        })?;

        debug!(
            "Opened preference store at {:?} ({} keys, flush_on_write={})",
            path,
            db.len(),
            flush_on_write
        );

        Ok(Self { db, flush_on_write })
    }

    fn flush_if_needed(&self) -> PrefsResult<()> {
        if self.flush_on_write {
            self.flush()?;
        }
        Ok(())
    }
}

impl Storage for SledStore {
    fn put(&self, key: &str, value: &Value) -> PrefsResult<()> {
        value.ensure_finite()?;
        let serialized = serde_json::to_vec(value)?;

        self.db
            .insert(key.as_bytes(), serialized)
            .map_err(|e| {
                PrefsError::Storage(format!("Failed to store value for key '{}': {}", key, e))
            })?;

        self.flush_if_needed()
    }

    fn get(&self, key: &str) -> PrefsResult<Option<Value>> {
        match self.db.get(key.as_bytes()) {
            Ok(Some(bytes)) => {
                let value = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(PrefsError::Storage(format!(
                "Failed to get value for key '{}': {}",
                key, e
            ))),
        }
    }

    fn delete(&self, key: &str) -> PrefsResult<()> {
        let previous = self.db.remove(key.as_bytes()).map_err(|e| {
            PrefsError::Storage(format!("Failed to delete key '{}': {}", key, e))
        })?;

        // nothing changed on disk
        if previous.is_none() {
            return Ok(());
        }

        self.flush_if_needed()
    }

    fn contains(&self, key: &str) -> PrefsResult<bool> {
        match self.db.contains_key(key.as_bytes()) {
            Ok(exists) => Ok(exists),
            Err(e) => Err(PrefsError::Storage(format!(
                "Failed to check if key '{}' exists: {}",
                key, e
            ))),
        }
    }

    fn list_keys(&self, prefix: &str) -> PrefsResult<Vec<String>> {
        let iter = self.db.scan_prefix(prefix.as_bytes());

        let mut keys = Vec::new();
        for item in iter {
            match item {
                Ok((key_bytes, _)) => {
                    if let Ok(key_str) = std::str::from_utf8(&key_bytes) {
                        keys.push(key_str.to_string());
                    }
                }
                Err(e) => {
                    return Err(PrefsError::Storage(format!(
                        "Failed to scan keys with prefix '{}': {}",
                        prefix, e
                    )))
                }
            }
        }

        Ok(keys)
    }

    fn flush(&self) -> PrefsResult<()> {
        self.db
            .flush()
            .map_err(|e| PrefsError::Storage(format!("Failed to flush database: {}", e)))?;
        Ok(())
    }
}
