//! Test identifiers carrying a name and the source call site.

use std::fmt;
use std::path::Path;

/// A label identifying one test case: a human name plus the file base-name
/// and line where it was built. Use the [`test_id!`](crate::test_id) macro
/// to capture the call site automatically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestId {
    name: String,
    location: Option<(String, u32)>,
}

impl TestId {
    /// Build an identifier with an explicit call site. Only the base-name
    /// of `file` is kept.
    pub fn new(name: impl Into<String>, file: &str, line: u32) -> Self {
        let base = Path::new(file)
            .file_name()
            .map(|f| f.to_string_lossy().into_owned());
        TestId {
            name: name.into(),
            location: base.map(|b| (b, line)),
        }
    }

    /// Build an identifier with no call site.
    pub fn named(name: impl Into<String>) -> Self {
        TestId {
            name: name.into(),
            location: None,
        }
    }

    /// The human name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some((file, line)) => write!(f, "test: {file}:{line}: {}", self.name),
            None => write!(f, "test: {}", self.name),
        }
    }
}

/// Build a [`TestId`] capturing the current file and line.
#[macro_export]
macro_rules! test_id {
    ($name:expr) => {
        $crate::TestId::new($name, file!(), line!())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_with_location() {
        let id = TestId::new("my case", "/a/b/some_test.rs", 42);
        assert_eq!(id.to_string(), "test: some_test.rs:42: my case");
    }

    #[test]
    fn renders_without_location() {
        let id = TestId::named("bare");
        assert_eq!(id.to_string(), "test: bare");
    }

    #[test]
    fn macro_captures_the_call_site() {
        let id = test_id!("captured");
        let rendered = id.to_string();
        assert!(rendered.starts_with("test: id.rs:"), "got {rendered}");
        assert!(rendered.ends_with(": captured"));
    }
}
