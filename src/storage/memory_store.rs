use crate::error::{PrefsError, PrefsResult};
use crate::storage::Storage;
use crate::value::Value;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Preferences that live only as long as the process
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> PrefsResult<RwLockReadGuard<'_, HashMap<String, Value>>> {
        self.entries
            .read()
            .map_err(|_| PrefsError::Storage("Memory store lock poisoned".to_string()))
    }

    fn write(&self) -> PrefsResult<RwLockWriteGuard<'_, HashMap<String, Value>>> {
        self.entries
            .write()
            .map_err(|_| PrefsError::Storage("Memory store lock poisoned".to_string()))
    }
}

impl Storage for MemoryStore {
    fn put(&self, key: &str, value: &Value) -> PrefsResult<()> {
        value.ensure_finite()?;
        self.write()?.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn get(&self, key: &str) -> PrefsResult<Option<Value>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn delete(&self, key: &str) -> PrefsResult<()> {
        self.write()?.remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> PrefsResult<bool> {
        Ok(self.read()?.contains_key(key))
    }

    fn list_keys(&self, prefix: &str) -> PrefsResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .read()?
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn flush(&self) -> PrefsResult<()> {
        Ok(())
    }
}
