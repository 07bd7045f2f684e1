//! Scalar comparison helpers.
//!
//! Each helper compares a known scalar kind and reports a formatted
//! difference through the sink. The returned boolean is `true` when a
//! difference was reported, so callers can short-circuit follow-up checks.
//! Tolerance-based float comparison lives here, not in the structural
//! differ, which compares floats exactly.

use std::fmt::Display;

use chrono::{DateTime, Utc};

use crate::id::TestId;
use crate::report::Reporter;

/// Returns `true` if `a` and `b` are within `epsilon` of one another.
pub fn almost_equal(a: f64, b: f64, epsilon: f64) -> bool {
    a == b || (a - b).abs() < epsilon
}

/// Compare two integers (signed or unsigned) and report any difference.
pub fn diff_int<T>(r: &mut dyn Reporter, id: &TestId, name: &str, act: T, exp: T) -> bool
where
    T: Copy + PartialEq + Display + Into<i128>,
{
    if act == exp {
        return false;
    }
    r.log(&id.to_string());
    r.log(&format!("\t: expected {name}: {exp}"));
    r.log(&format!("\t:   actual {name}: {act}"));
    r.log(&format!("\t:     diff: {}", (act.into() - exp.into()).abs()));
    r.fail(&format!("\t: {name} is incorrect"));
    true
}

/// Compare two floats to within `epsilon` and report any difference.
pub fn diff_float(
    r: &mut dyn Reporter,
    id: &TestId,
    name: &str,
    act: f64,
    exp: f64,
    epsilon: f64,
) -> bool {
    if almost_equal(act, exp, epsilon) {
        return false;
    }
    r.log(&id.to_string());
    report_float(r, name, act, exp);
    true
}

pub(crate) fn report_float(r: &mut dyn Reporter, name: &str, act: f64, exp: f64) {
    r.log(&format!("\t: expected {name}: {exp}"));
    r.log(&format!("\t:   actual {name}: {act}"));
    r.log(&format!("\t:     diff: {}", (act - exp).abs()));
    r.fail(&format!("\t: {name} is incorrect"));
}

/// Compare two booleans and report any difference.
pub fn diff_bool(r: &mut dyn Reporter, id: &TestId, name: &str, act: bool, exp: bool) -> bool {
    if act == exp {
        return false;
    }
    r.log(&id.to_string());
    r.log(&format!("\t: expected {name}: {exp}"));
    r.log(&format!("\t:   actual {name}: {act}"));
    r.fail(&format!("\t: {name} is incorrect"));
    true
}

/// Compare two strings and report any difference, with lengths.
pub fn diff_string(r: &mut dyn Reporter, id: &TestId, name: &str, act: &str, exp: &str) -> bool {
    if act == exp {
        return false;
    }
    r.log(&id.to_string());
    report_string(r, name, act, exp);
    true
}

pub(crate) fn report_string(r: &mut dyn Reporter, name: &str, act: &str, exp: &str) {
    r.log(&format!(
        "\t: expected {name} (length: {:4}): {exp:?}",
        exp.len()
    ));
    r.log(&format!(
        "\t:   actual {name} (length: {:4}): {act:?}",
        act.len()
    ));
    r.fail(&format!("\t: {name} is incorrect"));
}

/// Compare two optional displayable values. Both `None` is equal; one
/// `None` is reported; otherwise the renderings are compared.
pub fn diff_stringer(
    r: &mut dyn Reporter,
    id: &TestId,
    name: &str,
    act: Option<&dyn Display>,
    exp: Option<&dyn Display>,
) -> bool {
    match (act, exp) {
        (None, None) => false,
        (None, Some(_)) => {
            r.log(&id.to_string());
            r.log(&format!("\t: expected {name} is non-nil"));
            r.log(&format!("\t:   actual {name} is nil"));
            r.fail(&format!("\t: {name} is incorrect"));
            true
        }
        (Some(_), None) => {
            r.log(&id.to_string());
            r.log(&format!("\t: expected {name} is nil"));
            r.log(&format!("\t:   actual {name} is non-nil"));
            r.fail(&format!("\t: {name} is incorrect"));
            true
        }
        (Some(a), Some(e)) => diff_string(r, id, name, &a.to_string(), &e.to_string()),
    }
}

/// Compare two timestamps and report any difference, with the signed delta.
pub fn diff_time(
    r: &mut dyn Reporter,
    id: &TestId,
    name: &str,
    act: DateTime<Utc>,
    exp: DateTime<Utc>,
) -> bool {
    if act == exp {
        return false;
    }
    r.log(&id.to_string());
    r.log(&format!("\t: expected {name}: {exp}"));
    r.log(&format!("\t:   actual {name}: {act}"));
    r.log(&format!("\t: difference: {}", act.signed_duration_since(exp)));
    r.fail(&format!("\t: {name} is incorrect"));
    true
}

/// Compare two optional error renderings. Both `None` is equal; otherwise
/// presence and text must match. Note that only the textual rendering is
/// compared, not the error type.
pub fn diff_error(
    r: &mut dyn Reporter,
    id: &TestId,
    name: &str,
    act: Option<&dyn Display>,
    exp: Option<&dyn Display>,
) -> bool {
    let differ = match (act, exp) {
        (None, None) => false,
        (Some(a), Some(e)) => a.to_string() != e.to_string(),
        _ => true,
    };
    if !differ {
        return false;
    }
    let fmt = |v: Option<&dyn Display>| match v {
        Some(d) => d.to_string(),
        None => "<none>".to_string(),
    };
    r.log(&id.to_string());
    r.log(&format!("\t: expected {name}: {}", fmt(exp)));
    r.log(&format!("\t:   actual {name}: {}", fmt(act)));
    r.fail(&format!("\t: {name} is incorrect"));
    true
}
