//! Test support utilities for the attest toolkit.
//!
//! Everything here reports through the [`Reporter`] sink rather than
//! returning bare booleans: a reporter logs context lines and records the
//! failure, and the returned boolean only lets a caller short-circuit
//! further checks.
//!
//! # Key Types
//!
//! - [`TestId`] / [`test_id!`] -- test labels carrying the call site
//! - [`Reporter`] -- the reporting sink, with console and recording impls
//! - `diff_*` functions -- scalar and slice comparisons
//! - [`ExpectedError`] / [`ExpectedPanic`] -- outcome expectation records

pub mod contains;
pub mod expect;
pub mod id;
pub mod report;
pub mod scalar;
pub mod slices;

pub use contains::{missing_parts, should_contain};
pub use expect::{check_error, check_panic, panic_trap, ExpectedError, ExpectedPanic};
pub use id::TestId;
pub use report::{ConsoleReporter, RecordingReporter, Reporter};
pub use scalar::{
    almost_equal, diff_bool, diff_error, diff_float, diff_int, diff_string, diff_stringer,
    diff_time,
};
pub use slices::{
    diff_float_slice, diff_int_slice, diff_string_slice, str_slices_differ, MAX_REPORTED_DIFFS,
};
