//! Expected-outcome records for errors and panics.
//!
//! A test declares up front whether a case should error or panic and, if
//! so, which fragments the message must contain. The check helpers then
//! compare what actually happened against the declaration and report the
//! mismatch. They return `true` when the outcome matched, so a caller can
//! skip result checks that only make sense on success.

use std::fmt::Display;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::contains::missing_parts;
use crate::id::TestId;
use crate::report::Reporter;

/// Whether an operation should fail and what its error must mention.
#[derive(Clone, Debug, Default)]
pub struct ExpectedError {
    expected: bool,
    parts: Vec<String>,
}

impl ExpectedError {
    /// The operation should fail with an error containing every part.
    pub fn expecting<S: Into<String>>(parts: impl IntoIterator<Item = S>) -> Self {
        ExpectedError {
            expected: true,
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// The operation should succeed.
    pub fn none() -> Self {
        ExpectedError::default()
    }

    pub fn is_expected(&self) -> bool {
        self.expected
    }
}

/// Whether an operation should panic and what its message must mention.
#[derive(Clone, Debug, Default)]
pub struct ExpectedPanic {
    expected: bool,
    parts: Vec<String>,
}

impl ExpectedPanic {
    /// The operation should panic with a message containing every part.
    pub fn expecting<S: Into<String>>(parts: impl IntoIterator<Item = S>) -> Self {
        ExpectedPanic {
            expected: true,
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// The operation should complete without panicking.
    pub fn none() -> Self {
        ExpectedPanic::default()
    }

    pub fn is_expected(&self) -> bool {
        self.expected
    }
}

/// Check an actual error outcome against the expectation. Returns `true`
/// when the outcome is as declared.
pub fn check_error(
    r: &mut dyn Reporter,
    id: &TestId,
    actual: Option<&dyn Display>,
    expected: &ExpectedError,
) -> bool {
    match (actual, expected.expected) {
        (None, false) => true,
        (None, true) => {
            r.log(&id.to_string());
            r.fail("\t: the error was expected but not seen");
            false
        }
        (Some(err), false) => {
            r.log(&id.to_string());
            r.log(&format!("\t: the unexpected error: {err}"));
            r.fail("\t: the error was not expected");
            false
        }
        (Some(err), true) => {
            let text = err.to_string();
            let missing = missing_parts(&text, &expected.parts);
            if missing.is_empty() {
                return true;
            }
            r.log(&id.to_string());
            r.log(&format!("\t: the error message: {text:?}"));
            for part in &missing {
                r.log(&format!("\t: should contain: {part:?}"));
            }
            r.fail("\t: the error message is incorrect");
            false
        }
    }
}

/// Check an observed panic outcome, as returned by [`panic_trap`], against
/// the expectation. Returns `true` when the outcome is as declared.
pub fn check_panic(
    r: &mut dyn Reporter,
    id: &TestId,
    panicked: Option<&str>,
    expected: &ExpectedPanic,
) -> bool {
    match (panicked, expected.expected) {
        (None, false) => true,
        (None, true) => {
            r.log(&id.to_string());
            r.fail("\t: the panic was expected but not seen");
            false
        }
        (Some(msg), false) => {
            r.log(&id.to_string());
            r.log(&format!("\t: the unexpected panic: {msg}"));
            r.fail("\t: the panic was not expected");
            false
        }
        (Some(msg), true) => {
            let missing = missing_parts(msg, &expected.parts);
            if missing.is_empty() {
                return true;
            }
            r.log(&id.to_string());
            r.log(&format!("\t: the panic message: {msg:?}"));
            for part in &missing {
                r.log(&format!("\t: should contain: {part:?}"));
            }
            r.fail("\t: the panic message is incorrect");
            false
        }
    }
}

/// Run `f`, trapping any panic. Returns `None` if it completed, otherwise
/// the panic message. Non-string payloads get a placeholder message.
pub fn panic_trap<F: FnOnce() -> R, R>(f: F) -> (Option<String>, Option<R>) {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(res) => (None, Some(res)),
        Err(payload) => {
            let msg = if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else {
                "<non-string panic payload>".to_string()
            };
            (Some(msg), None)
        }
    }
}
