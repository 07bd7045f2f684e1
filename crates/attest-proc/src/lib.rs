//! Process-state collaborators for tests: a scoped environment-variable
//! cache and captured standard streams.
//!
//! Both types restore the state they touched when dropped, so a test that
//! panics partway through does not leak environment changes or dangling
//! pipe threads into the next test.

pub mod capture;
pub mod env;
pub mod error;

pub use capture::{CapturedIo, CapturedOutput};
pub use env::EnvCache;
pub use error::{ProcError, ProcResult};
