pub mod memory_store;
pub mod sled_store;

pub use memory_store::MemoryStore;
pub use sled_store::SledStore;

use crate::error::PrefsResult;
use crate::value::Value;

/// Trait for persistent preference stores
pub trait Storage: Send + Sync {
    /// Store a value with a key, replacing any previous value
    fn put(&self, key: &str, value: &Value) -> PrefsResult<()>;

    /// Retrieve a value by key
    fn get(&self, key: &str) -> PrefsResult<Option<Value>>;

    /// Delete a value by key. Deleting an absent key succeeds.
    fn delete(&self, key: &str) -> PrefsResult<()>;

    /// Check if a key exists
    fn contains(&self, key: &str) -> PrefsResult<bool>;

    /// List all keys with a prefix
    fn list_keys(&self, prefix: &str) -> PrefsResult<Vec<String>>;

    /// Make every accepted write durable
    fn flush(&self) -> PrefsResult<()>;
}
