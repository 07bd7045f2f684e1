//! Slice comparison helpers.
//!
//! Lengths are checked first; when they differ nothing elementwise is
//! reported. Elementwise differences are reported up to
//! [`MAX_REPORTED_DIFFS`] entries, then elided, and a count summary closes
//! the report.

use std::fmt::Display;

use crate::id::TestId;
use crate::report::Reporter;
use crate::scalar::almost_equal;

/// How many per-index differences are shown before the report is elided.
pub const MAX_REPORTED_DIFFS: usize = 5;

/// Compare two integer slices and report any difference.
pub fn diff_int_slice<T>(
    r: &mut dyn Reporter,
    id: &TestId,
    name: &str,
    act: &[T],
    exp: &[T],
) -> bool
where
    T: Copy + PartialEq + Display,
{
    diff_slice(r, id, name, act, exp, |a, e| a == e, |v| v.to_string())
}

/// Compare two float slices to within `epsilon` and report any difference.
pub fn diff_float_slice(
    r: &mut dyn Reporter,
    id: &TestId,
    name: &str,
    act: &[f64],
    exp: &[f64],
    epsilon: f64,
) -> bool {
    diff_slice(
        r,
        id,
        name,
        act,
        exp,
        |a, e| almost_equal(*a, *e, epsilon),
        |v| v.to_string(),
    )
}

/// Compare two string slices and report any difference.
pub fn diff_string_slice<S: AsRef<str>>(
    r: &mut dyn Reporter,
    id: &TestId,
    name: &str,
    act: &[S],
    exp: &[S],
) -> bool {
    diff_slice(
        r,
        id,
        name,
        act,
        exp,
        |a, e| a.as_ref() == e.as_ref(),
        |v| format!("{:?}", v.as_ref()),
    )
}

/// Returns `true` if two string slices differ, without reporting anything.
pub fn str_slices_differ<S: AsRef<str>>(act: &[S], exp: &[S]) -> bool {
    act.len() != exp.len()
        || act
            .iter()
            .zip(exp.iter())
            .any(|(a, e)| a.as_ref() != e.as_ref())
}

fn diff_slice<T>(
    r: &mut dyn Reporter,
    id: &TestId,
    name: &str,
    act: &[T],
    exp: &[T],
    eq: impl Fn(&T, &T) -> bool,
    render: impl Fn(&T) -> String,
) -> bool {
    if act.len() != exp.len() {
        r.log(&id.to_string());
        r.log(&format!("\t: expected {name} length: {}", exp.len()));
        r.log(&format!("\t:   actual {name} length: {}", act.len()));
        r.fail(&format!("\t: {name} is incorrect"));
        return true;
    }

    let mut count = 0usize;
    for (i, (a, e)) in act.iter().zip(exp.iter()).enumerate() {
        if eq(a, e) {
            continue;
        }
        count += 1;
        if count == 1 {
            r.log(&id.to_string());
        }
        if count <= MAX_REPORTED_DIFFS {
            r.log(&format!("\t: expected {name}[{i}]: {}", render(e)));
            r.log(&format!("\t:   actual {name}[{i}]: {}", render(a)));
        } else if count == MAX_REPORTED_DIFFS + 1 {
            r.log("\t: ...");
        }
    }
    if count == 0 {
        return false;
    }
    r.log(&format!("\t: {count} difference(s) found"));
    r.fail(&format!("\t: {name} is incorrect"));
    true
}
