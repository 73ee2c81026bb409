use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type PrefsResult<T> = Result<T, PrefsError>;
