//! Error types for the JSON exporter.

use healthid_core::Collection;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing or reading an exported dataset.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The directory has no manifest, so it was not written by this exporter.
    #[error("No manifest found at {0}")]
    MissingManifest(PathBuf),

    /// A collection listed as required is absent from the directory.
    #[error("Collection '{collection}' not found at {path}")]
    MissingCollection {
        collection: Collection,
        path: PathBuf,
    },

    /// A JSONL line could not be parsed.
    #[error("{path}:{line}: {source}")]
    Line {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },
}
