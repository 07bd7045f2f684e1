//! The recursive structural comparator.
//!
//! `diff_at` walks two values in lockstep, depth-first, and returns the
//! first difference found anywhere in the subtree. Record members are
//! visited in declaration order, sequence elements in index order, and map
//! entries in key order, so the reported difference is deterministic.

use std::fmt::Display;

use attest_value::{to_value, Kind, Value};
use serde::Serialize;

use crate::error::{DiffOutcome, Mismatch, ReflectDiffError};
use crate::trail::Trail;

/// Compare two values, reporting the first difference.
pub fn diff_values(actual: &Value, expected: &Value) -> DiffOutcome {
    diff_values_ignoring(actual, expected, &[])
}

/// Compare two values, skipping any location whose chain of record member
/// names starts with one of the `ignore` rules. A rule `["a", "b"]` skips
/// the member called `b` inside the member called `a`, regardless of any
/// sequence indices or map keys on the way there.
pub fn diff_values_ignoring(
    actual: &Value,
    expected: &Value,
    ignore: &[Vec<String>],
) -> DiffOutcome {
    diff_at(actual, expected, Trail::new(ignore))
}

/// Build one ignore rule from any iterable of name segments.
pub fn ignore_path<I, S>(parts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    parts.into_iter().map(Into::into).collect()
}

/// Compare two serializable values by lowering both into the value model
/// first. The sides may be different Rust types; comparing across types
/// reports a type mismatch rather than failing to compile.
pub fn diff_reflect<A, E>(actual: &A, expected: &E) -> Result<(), ReflectDiffError>
where
    A: Serialize + ?Sized,
    E: Serialize + ?Sized,
{
    let act = to_value(actual).map_err(ReflectDiffError::Actual)?;
    let exp = to_value(expected).map_err(ReflectDiffError::Expected)?;
    diff_values(&act, &exp)?;
    Ok(())
}

fn value_mismatch(trail: &Trail, kind: Kind, actual: impl Display, expected: impl Display) -> Mismatch {
    Mismatch::ValueMismatch {
        path: trail.path().to_string(),
        kind,
        actual: actual.to_string(),
        expected: expected.to_string(),
    }
}

fn fmt_complex(re: f64, im: f64) -> String {
    format!("({re}{im:+}i)")
}

fn diff_at(actual: &Value, expected: &Value, mut trail: Trail) -> DiffOutcome {
    if trail.skipped() {
        return Ok(());
    }

    trail.bump();

    match (actual, expected) {
        (Value::Absent, Value::Absent) => Ok(()),
        (Value::Absent, _) => Err(Mismatch::ActualAbsent {
            path: trail.path().to_string(),
        }),
        (_, Value::Absent) => Err(Mismatch::ExpectedAbsent {
            path: trail.path().to_string(),
        }),

        _ if !actual.same_type(expected) => Err(Mismatch::TypeMismatch {
            path: trail.path().to_string(),
            actual: actual.type_desc(),
            expected: expected.type_desc(),
        }),

        (Value::Bool(a), Value::Bool(e)) => {
            if a == e {
                Ok(())
            } else {
                Err(value_mismatch(&trail, Kind::Bool, a, e))
            }
        }
        (Value::Int(a), Value::Int(e)) => {
            if a == e {
                Ok(())
            } else {
                Err(value_mismatch(&trail, Kind::Int, a, e))
            }
        }
        (Value::Uint(a), Value::Uint(e)) => {
            if a == e {
                Ok(())
            } else {
                Err(value_mismatch(&trail, Kind::Uint, a, e))
            }
        }
        // Exact equality here; tolerance comparison is a scalar-helper
        // concern, not the differ's.
        (Value::Float(a), Value::Float(e)) => {
            if a == e {
                Ok(())
            } else {
                Err(value_mismatch(&trail, Kind::Float, a, e))
            }
        }
        (
            Value::Complex { re: a_re, im: a_im },
            Value::Complex { re: e_re, im: e_im },
        ) => {
            if a_re == e_re && a_im == e_im {
                Ok(())
            } else {
                Err(value_mismatch(
                    &trail,
                    Kind::Complex,
                    fmt_complex(*a_re, *a_im),
                    fmt_complex(*e_re, *e_im),
                ))
            }
        }
        (Value::Text(a), Value::Text(e)) => {
            if a == e {
                Ok(())
            } else {
                Err(value_mismatch(
                    &trail,
                    Kind::Text,
                    format!("{a:?}"),
                    format!("{e:?}"),
                ))
            }
        }
        (Value::Word(a), Value::Word(e)) => {
            if a == e {
                Ok(())
            } else {
                Err(value_mismatch(&trail, Kind::Word, a, e))
            }
        }

        (Value::Boxed(a), Value::Boxed(e)) => diff_at(a, e, trail),

        // Lengths are guaranteed equal by the type check above.
        (Value::FixedSeq(a), Value::FixedSeq(e)) => {
            for (i, (av, ev)) in a.iter().zip(e.iter()).enumerate() {
                diff_at(av, ev, trail.index(i))?;
            }
            Ok(())
        }

        (Value::Seq(a), Value::Seq(e)) => {
            if trail.must_be_equal(
                actual.addr().unwrap_or(0),
                expected.addr().unwrap_or(0),
                Kind::Seq,
            ) {
                return Ok(());
            }
            if a.len() != e.len() {
                return Err(Mismatch::LengthMismatch {
                    path: trail.path().to_string(),
                    kind: Kind::Seq,
                    actual: a.len(),
                    expected: e.len(),
                });
            }
            for (i, (av, ev)) in a.iter().zip(e.iter()).enumerate() {
                diff_at(av, ev, trail.index(i))?;
            }
            Ok(())
        }

        (Value::Map(a), Value::Map(e)) => {
            if trail.must_be_equal(
                actual.addr().unwrap_or(0),
                expected.addr().unwrap_or(0),
                Kind::Map,
            ) {
                return Ok(());
            }
            if a.len() != e.len() {
                return Err(Mismatch::LengthMismatch {
                    path: trail.path().to_string(),
                    kind: Kind::Map,
                    actual: a.len(),
                    expected: e.len(),
                });
            }
            for (key, av) in a.iter() {
                let at = trail.key(key);
                match e.get(key) {
                    Some(ev) => diff_at(av, ev, at)?,
                    None => {
                        return Err(Mismatch::ExpectedAbsent {
                            path: at.path().to_string(),
                        })
                    }
                }
            }
            Ok(())
        }

        // Field counts and names are guaranteed equal by the type check.
        (
            Value::Record { fields: a_fields, .. },
            Value::Record { fields: e_fields, .. },
        ) => {
            for ((name, av), (_, ev)) in a_fields.iter().zip(e_fields.iter()) {
                diff_at(av, ev, trail.field(name))?;
            }
            Ok(())
        }

        (Value::Ref(a), Value::Ref(e)) => {
            if trail.must_be_equal(
                actual.addr().unwrap_or(0),
                expected.addr().unwrap_or(0),
                Kind::Ref,
            ) {
                return Ok(());
            }
            let av = a.borrow();
            let ev = e.borrow();
            diff_at(&av, &ev, trail)
        }

        (Value::Func(a), Value::Func(e)) => identity(&trail, Kind::Func, *a, *e),
        (Value::Chan(a), Value::Chan(e)) => identity(&trail, Kind::Chan, *a, *e),
        (Value::RawAddr(a), Value::RawAddr(e)) => identity(&trail, Kind::RawAddr, *a, *e),

        _ => unreachable!("shape kinds diverged after the type check"),
    }
}

fn identity(trail: &Trail, kind: Kind, act: usize, exp: usize) -> DiffOutcome {
    if act == exp {
        Ok(())
    } else {
        Err(Mismatch::IdentityMismatch {
            path: trail.path().to_string(),
            kind,
        })
    }
}
