//! Error types for the record store

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read snapshot {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("Failed to write snapshot {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },

    /// The snapshot file exists but does not decode; never served silently
    #[error("Snapshot '{name}' is malformed: {source}")]
    Malformed { name: String, source: serde_json::Error },

    #[error("Failed to encode snapshot '{name}': {source}")]
    Encode { name: String, source: serde_json::Error },
}

impl StoreError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read { path: path.into(), source }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write { path: path.into(), source }
    }

    pub fn malformed(name: &str, source: serde_json::Error) -> Self {
        Self::Malformed { name: name.to_string(), source }
    }

    pub fn encode(name: &str, source: serde_json::Error) -> Self {
        Self::Encode { name: name.to_string(), source }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
