//! Errors raised while producing a graph snapshot

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The data file exists but does not describe a valid graph.
    #[error("invalid graph data in {path}: {reason}")]
    DataFormat { path: PathBuf, reason: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking load task panicked or was cancelled.
    #[error("graph load task failed: {0}")]
    Task(String),
}

impl StoreError {
    pub fn is_data_format(&self) -> bool {
        matches!(self, StoreError::DataFormat { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
