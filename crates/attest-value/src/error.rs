//! Error types for the value crate.

use std::fmt::Display;

use thiserror::Error;

/// Errors produced while lowering a value into the dynamic model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    /// A map key serialized to a kind that cannot order map entries.
    #[error("unsupported map key kind: {0}")]
    UnsupportedKey(String),

    /// An error raised by a `Serialize` implementation.
    #[error("{0}")]
    Message(String),
}

impl serde::ser::Error for ValueError {
    fn custom<T: Display>(msg: T) -> Self {
        ValueError::Message(msg.to_string())
    }
}

/// Convenience alias for value results.
pub type ValueResult<T> = Result<T, ValueError>;
