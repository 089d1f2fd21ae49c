use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the resolver, storage and form layers.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Attachment conversion failed: {0}")]
    Attachment(String),
}

pub type Result<T> = StdResult<T, EntryError>;

impl From<std::io::Error> for EntryError {
    fn from(err: std::io::Error) -> Self {
        EntryError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for EntryError {
    fn from(err: serde_json::Error) -> Self {
        EntryError::Storage(err.to_string())
    }
}
