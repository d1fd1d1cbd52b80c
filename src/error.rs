use std::path::PathBuf;
use thiserror::Error;

/// Failures around the parser: reading dumps, writing exports.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No SQL dump loaded")]
    NoSource,
    #[error("Unknown table: {0}")]
    UnknownTable(String),
    #[error("No columns to export")]
    NothingToExport,
}
