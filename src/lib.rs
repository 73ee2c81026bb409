pub mod config;
pub mod defaults;
pub mod error;
pub mod storage;
pub mod value;

pub use error::{PrefsError, PrefsResult};

// Re-export main types for easier access
pub use config::Settings;
pub use defaults::{get_boolean, get_integer, get_string, get_value, remove, set, UserDefaults};
pub use storage::{MemoryStore, SledStore, Storage};
pub use value::Value;
