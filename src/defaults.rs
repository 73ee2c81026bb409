//! Process-wide preferences.
//!
//! [`UserDefaults`] is a stateless handle over a [`Storage`]. The free
//! functions at the bottom of this module act on the standard instance, which
//! is opened lazily from [`Settings::load`] the first time any of them runs.
//!
//! Nothing here reports failure. A missing key, a value of another type, or a
//! store error all read back as the type's default (`""`, `0`, `false`,
//! `None`). Store errors are logged at `warn` level; callers that need them
//! can go through [`UserDefaults::storage`] instead.

use crate::config::{Backend, Settings};
use crate::error::PrefsResult;
use crate::storage::{MemoryStore, SledStore, Storage};
use crate::value::Value;
use log::{debug, error, warn};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::{Arc, OnceLock};

static STANDARD: OnceLock<UserDefaults> = OnceLock::new();

#[derive(Clone)]
pub struct UserDefaults {
    storage: Arc<dyn Storage>,
}

impl UserDefaults {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Open the store the settings describe.
    pub fn open(settings: &Settings) -> PrefsResult<Self> {
        settings.validate()?;

        let storage: Arc<dyn Storage> = match settings.backend {
            Backend::Sled => Arc::new(SledStore::with_flush(
                &settings.store_path,
                settings.flush_on_write,
            )?),
            Backend::Memory => Arc::new(MemoryStore::new()),
        };

        Ok(Self::new(storage))
    }

    /// The process-wide instance used by the free functions.
    ///
    /// Falls back to an in-memory store if the configured one cannot be opened.
    pub fn standard() -> &'static UserDefaults {
        STANDARD.get_or_init(|| {
            match Settings::load().and_then(|settings| Self::open(&settings)) {
                Ok(defaults) => defaults,
                Err(e) => {
                    error!(
                        "Failed to open preference store, using in-memory preferences: {}",
                        e
                    );
                    Self::in_memory()
                }
            }
        })
    }

    /// Choose the standard instance before anything touches it. Hands the
    /// value back if the standard instance already exists.
    pub fn install(defaults: UserDefaults) -> Result<(), UserDefaults> {
        STANDARD.set(defaults)
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn set(&self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        debug!("Setting preference '{}' ({})", key, value.kind());
        let result = self.storage.put(key, &value);
        swallow("set", key, result);
    }

    /// Store any serde type under `key`.
    pub fn set_object<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Some(value) = swallow("encode", key, Value::from_serializable(value)) {
            self.set(key, value);
        }
    }

    pub fn remove(&self, key: &str) {
        debug!("Removing preference '{}'", key);
        let result = self.storage.delete(key);
        swallow("remove", key, result);
    }

    pub fn get_value(&self, key: &str) -> Option<Value> {
        swallow("get", key, self.storage.get(key)).flatten()
    }

    pub fn get_string(&self, key: &str) -> String {
        self.get_value(key)
            .and_then(|value| value.as_str().map(str::to_owned))
            .unwrap_or_default()
    }

    pub fn get_integer(&self, key: &str) -> i64 {
        self.get_value(key)
            .and_then(|value| value.as_integer())
            .unwrap_or(0)
    }

    pub fn get_float(&self, key: &str) -> f64 {
        self.get_value(key)
            .and_then(|value| value.as_float())
            .unwrap_or(0.0)
    }

    pub fn get_boolean(&self, key: &str) -> bool {
        self.get_value(key)
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    /// Decode the stored value into `T`; `None` if absent or shaped differently.
    pub fn get_object<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get_value(key)?;
        match value.deserialize_into() {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                debug!("Preference '{}' does not decode as requested: {}", key, e);
                None
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        swallow("contains", key, self.storage.contains(key)).unwrap_or(false)
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys_with_prefix("")
    }

    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        swallow("list", prefix, self.storage.list_keys(prefix)).unwrap_or_default()
    }

    pub fn flush(&self) {
        swallow("flush", "", self.storage.flush());
    }
}

fn swallow<T>(operation: &str, key: &str, result: PrefsResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Preference {} failed for '{}': {}", operation, key, e);
            None
        }
    }
}

/// Persist `value` under `key` in the standard store.
pub fn set(key: &str, value: impl Into<Value>) {
    UserDefaults::standard().set(key, value)
}

pub fn remove(key: &str) {
    UserDefaults::standard().remove(key)
}

pub fn get_value(key: &str) -> Option<Value> {
    UserDefaults::standard().get_value(key)
}

pub fn get_string(key: &str) -> String {
    UserDefaults::standard().get_string(key)
}

pub fn get_integer(key: &str) -> i64 {
    UserDefaults::standard().get_integer(key)
}

pub fn get_boolean(key: &str) -> bool {
    UserDefaults::standard().get_boolean(key)
}
