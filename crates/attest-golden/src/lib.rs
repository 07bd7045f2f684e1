//! Golden-file comparison and filesystem fixtures for the attest toolkit.
//!
//! A golden file holds the expected output of a test. [`GoldenFileCfg`]
//! names where the files live and compares actual bytes against them,
//! rendering a unified diff on mismatch. Two environment-variable switches
//! change its behavior: one rewrites the golden files from the actual
//! values (preserving the previous content as `.orig`), the other keeps
//! mismatching actual values next to the golden file as `.badResults`.
//!
//! The fixtures in [`fixture`] give tests scoped scratch directories and
//! scoped permission changes that undo themselves on drop.

pub mod error;
pub mod fixture;
pub mod golden;

pub use error::{GoldenError, GoldenResult};
#[cfg(unix)]
pub use fixture::ScopedChmod;
pub use fixture::{scratch_dir, ScopedDir};
pub use golden::GoldenFileCfg;
