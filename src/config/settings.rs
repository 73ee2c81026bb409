use crate::error::{PrefsError, PrefsResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const PATH_VAR: &str = "USER_DEFAULTS_PATH";
pub const BACKEND_VAR: &str = "USER_DEFAULTS_BACKEND";
pub const FLUSH_VAR: &str = "USER_DEFAULTS_FLUSH_ON_WRITE";

/// Which store backs the standard instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Sled,
    Memory,
}

impl FromStr for Backend {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sled" => Ok(Backend::Sled),
            "memory" => Ok(Backend::Memory),
            other => Err(PrefsError::Configuration(format!(
                "Unsupported preference backend: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub store_path: PathBuf,
    pub backend: Backend,
    pub flush_on_write: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .map(|dir| dir.join("user_defaults"))
            .unwrap_or_else(|| PathBuf::from(".user_defaults"));

        Self {
            store_path: data_dir.join("store"),
            backend: Backend::Sled,
            flush_on_write: true,
        }
    }
}

impl Settings {
    /// Read settings from the process environment (and `.env`, if present),
    /// creating the store directory when the sled backend is selected.
    pub fn load() -> PrefsResult<Self> {
        // Try to load .env file, but continue if it doesn't exist
        let _ = dotenv();

        let settings = Self::from_lookup(|name| env::var(name).ok())?;
        settings.validate()?;

        if settings.backend == Backend::Sled && !settings.store_path.exists() {
            if let Err(e) = std::fs::create_dir_all(&settings.store_path) {
                return Err(PrefsError::Configuration(format!(
                    "Failed to create preference store directory {:?}: {}",
                    settings.store_path, e
                )));
            }
        }

        Ok(settings)
    }

    /// Build settings from an arbitrary variable lookup. Unset variables keep
    /// their defaults; set but unparseable ones are an error.
    pub fn from_lookup<F>(lookup: F) -> PrefsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(path) = lookup(PATH_VAR) {
            settings.store_path = PathBuf::from(path);
        }

        if let Some(backend) = lookup(BACKEND_VAR) {
            settings.backend = backend.parse()?;
        }

        if let Some(flush) = lookup(FLUSH_VAR) {
            settings.flush_on_write = flush.trim().parse::<bool>().map_err(|_| {
                PrefsError::Configuration(format!(
                    "{} must be 'true' or 'false', got '{}'",
                    FLUSH_VAR, flush
                ))
            })?;
        }

        Ok(settings)
    }

    pub fn validate(&self) -> PrefsResult<()> {
        if self.backend == Backend::Sled && self.store_path.as_os_str().is_empty() {
            return Err(PrefsError::Configuration(
                "A store path is required when using the sled backend".to_string(),
            ));
        }

        Ok(())
    }
}
