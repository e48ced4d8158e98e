use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a whole batch file. Bad entries inside a file are
/// skipped and never surface here.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("input not found: {0}")]
    NotFound(PathBuf),
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
