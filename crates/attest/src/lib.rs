//! Unit-test support toolkit.
//!
//! Provides a unified surface over the attest crates: deep structural
//! diffing with path reporting, scalar and slice comparison helpers,
//! golden-file checks, and process-state fixtures.
//!
//! ```
//! use attest::{diff_values, Value};
//!
//! let err = diff_values(&Value::from(1i64), &Value::from(2i64)).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "this: int values differ. Actual: 1, expected: 2"
//! );
//! ```

// Re-export key types
pub use attest_value::{to_value, Kind, MapKey, Value, ValueCell, ValueError, ValueResult};

pub use attest_diff::{
    diff_reflect, diff_values, diff_values_ignoring, ignore_path, DiffOutcome, Mismatch,
    ReflectDiffError,
};

pub use attest_check::{
    almost_equal, check_error, check_panic, diff_bool, diff_error, diff_float, diff_float_slice,
    diff_int, diff_int_slice, diff_string, diff_string_slice, diff_stringer, diff_time,
    missing_parts, panic_trap, should_contain, str_slices_differ, test_id, ConsoleReporter,
    ExpectedError, ExpectedPanic, RecordingReporter, Reporter, TestId, MAX_REPORTED_DIFFS,
};

#[cfg(unix)]
pub use attest_golden::ScopedChmod;
pub use attest_golden::{scratch_dir, GoldenError, GoldenFileCfg, GoldenResult, ScopedDir};

pub use attest_proc::{CapturedIo, CapturedOutput, EnvCache, ProcError, ProcResult};
