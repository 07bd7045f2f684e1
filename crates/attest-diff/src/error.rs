//! Error types for the diff crate.

use attest_value::{Kind, ValueError};
use thiserror::Error;

/// Exactly one difference between two values.
///
/// Every variant carries the display path of the location where the walk
/// stopped, rooted at `this`. `Display` renders the path followed by a
/// kind-specific message.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Mismatch {
    /// The actual side has no value at this location, the expected side does.
    #[error("{path}: the actual value is absent, the expected value is not")]
    ActualAbsent { path: String },

    /// The expected side has no value at this location, the actual side does.
    #[error("{path}: the expected value is absent, the actual value is not")]
    ExpectedAbsent { path: String },

    /// Both sides have values but of incompatible declared types.
    #[error("{path}: types differ. Actual: {actual}, expected: {expected}")]
    TypeMismatch {
        path: String,
        actual: String,
        expected: String,
    },

    /// Same shape, different content.
    #[error("{path}: {kind} values differ. Actual: {actual}, expected: {expected}")]
    ValueMismatch {
        path: String,
        kind: Kind,
        actual: String,
        expected: String,
    },

    /// Same container kind, different element count.
    #[error("{path}: {kind} lengths differ. Actual: {actual}, expected: {expected}")]
    LengthMismatch {
        path: String,
        kind: Kind,
        actual: usize,
        expected: usize,
    },

    /// An identity-only kind that is not the same underlying reference.
    #[error("{path}: {kind}s differ. Actual instance is not equal to expected")]
    IdentityMismatch { path: String, kind: Kind },
}

impl Mismatch {
    /// The display path where the difference was found.
    pub fn path(&self) -> &str {
        match self {
            Mismatch::ActualAbsent { path }
            | Mismatch::ExpectedAbsent { path }
            | Mismatch::TypeMismatch { path, .. }
            | Mismatch::ValueMismatch { path, .. }
            | Mismatch::LengthMismatch { path, .. }
            | Mismatch::IdentityMismatch { path, .. } => path,
        }
    }
}

/// The result of one comparison: no difference, or exactly one [`Mismatch`].
pub type DiffOutcome = Result<(), Mismatch>;

/// Errors from the `Serialize`-based entry point: either side failed to
/// lower into the value model, or the comparison found a difference.
#[derive(Debug, Error)]
pub enum ReflectDiffError {
    #[error("failed to lower the actual value: {0}")]
    Actual(#[source] ValueError),

    #[error("failed to lower the expected value: {0}")]
    Expected(#[source] ValueError),

    #[error(transparent)]
    Mismatch(#[from] Mismatch),
}
