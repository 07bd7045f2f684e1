//! Error types for process-state collaborators.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("the captured streams were already finished")]
    AlreadyFinished,

    #[error("copying the captured {stream} stream: {source}")]
    StreamCopy {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },
}

pub type ProcResult<T> = Result<T, ProcError>;
