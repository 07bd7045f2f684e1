//! The test-reporting sink.
//!
//! Comparison helpers report through this trait instead of returning
//! booleans alone, so the same helper works under a console runner or a
//! recording harness.

/// A sink for comparison output. `log` adds a context line; `fail` adds a
/// line and marks the current check as failed.
pub trait Reporter {
    fn log(&mut self, line: &str);
    fn fail(&mut self, line: &str);
}

/// A reporter that prints to stderr and remembers whether anything failed.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    failed: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if any `fail` call was seen.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Panic if any failure was reported. Call at the end of a test.
    pub fn assert_ok(&self) {
        if self.failed {
            panic!("one or more checks failed; see the log above");
        }
    }
}

impl Reporter for ConsoleReporter {
    fn log(&mut self, line: &str) {
        eprintln!("{line}");
    }

    fn fail(&mut self, line: &str) {
        eprintln!("{line}");
        self.failed = true;
    }
}

/// A reporter that buffers everything, for inspecting helper output.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    lines: Vec<String>,
    failures: Vec<String>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line seen, in order, failures included.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Only the lines passed to `fail`.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn is_failed(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Returns `true` if any recorded line contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn log(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn fail(&mut self, line: &str) {
        self.lines.push(line.to_string());
        self.failures.push(line.to_string());
    }
}
