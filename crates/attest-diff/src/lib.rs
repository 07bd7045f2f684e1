//! Deep structural differ for the attest toolkit.
//!
//! Given an actual and an expected [`attest_value::Value`], the differ walks
//! both depth-first and reports the first difference it finds, with a
//! human-readable path into the structure (`this.mss.i`, `this[2]`,
//! `this[key]`). It terminates safely on cyclic object graphs and supports
//! caller-specified field paths to skip.
//!
//! # Key Types
//!
//! - [`Mismatch`] -- exactly one difference, carrying path and message
//! - [`diff_values`] / [`diff_values_ignoring`] -- entry points over `Value`
//! - [`diff_reflect`] -- convenience entry point over `serde::Serialize` types

pub mod diff;
pub mod error;

mod trail;

pub use diff::{diff_reflect, diff_values, diff_values_ignoring, ignore_path};
pub use error::{DiffOutcome, Mismatch, ReflectDiffError};
