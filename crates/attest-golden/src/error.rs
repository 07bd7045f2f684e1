//! Golden-file error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or maintaining golden files.
#[derive(Debug, Error)]
pub enum GoldenError {
    #[error("golden file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("golden file {path} does not exist")]
    MissingGolden { path: PathBuf },
}

pub type GoldenResult<T> = Result<T, GoldenError>;
