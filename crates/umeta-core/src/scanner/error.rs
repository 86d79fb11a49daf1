use std::path::PathBuf;
use thiserror::Error;

use crate::parser::ParseError;
use crate::storage::StorageError;

/// Errors that abort a scan or a single-file parse.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Source directory not found: {0}")]
    MissingSourceDir(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
