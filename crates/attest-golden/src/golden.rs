//! Golden-file comparison.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use similar::{ChangeTag, TextDiff};
use tracing::{debug, warn};

use attest_check::{Reporter, TestId};

use crate::error::{GoldenError, GoldenResult};

/// Where a family of golden files lives and how they are named.
///
/// `path_name("case")` resolves to `<dir>/<prefix>.case.<suffix>`, with an
/// empty prefix or suffix dropping the neighboring dot. The two env-var
/// names are switches read at check time; leave them empty to disable the
/// corresponding mode.
#[derive(Clone, Debug, Default)]
pub struct GoldenFileCfg {
    pub dir: PathBuf,
    pub prefix: String,
    pub suffix: String,
    pub update_env_var: String,
    pub keep_bad_env_var: String,
}

impl GoldenFileCfg {
    /// The full path of the golden file for `name`.
    pub fn path_name(&self, name: &str) -> PathBuf {
        let mut parts = Vec::with_capacity(3);
        if !self.prefix.is_empty() {
            parts.push(self.prefix.as_str());
        }
        parts.push(name);
        if !self.suffix.is_empty() {
            parts.push(self.suffix.as_str());
        }
        self.dir.join(parts.join("."))
    }

    /// Returns `true` if the update switch is set in the environment.
    pub fn update_requested(&self) -> bool {
        switch_set(&self.update_env_var)
    }

    /// Returns `true` if the keep-bad switch is set in the environment.
    pub fn keep_bad_requested(&self) -> bool {
        switch_set(&self.keep_bad_env_var)
    }

    /// Compare `actual` against the golden file for `name`, reporting a
    /// unified diff on mismatch. Returns `true` when a difference (or a
    /// problem reading the golden file) was reported.
    ///
    /// In update mode the golden file is rewritten from `actual` first,
    /// with the previous content preserved at `<path>.orig`, and then
    /// compared as usual. In keep-bad mode a mismatch also writes the
    /// actual bytes to `<path>.badResults`.
    pub fn check(&self, r: &mut dyn Reporter, id: &TestId, name: &str, actual: &[u8]) -> bool {
        let path = self.path_name(name);

        if self.update_requested() {
            if let Err(err) = self.update(&path, actual) {
                r.log(&id.to_string());
                r.fail(&format!("\t: could not update the golden file: {err}"));
                return true;
            }
        }

        let expected = match read_golden(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                r.log(&id.to_string());
                r.fail(&format!("\t: {err}"));
                self.log_update_hint(r);
                return true;
            }
        };

        if actual == expected.as_slice() {
            return false;
        }

        r.log(&id.to_string());
        r.log(&format!("\t: golden file: {}", path.display()));
        for line in render_diff(&expected, actual).lines() {
            r.log(&format!("\t: {line}"));
        }
        if self.keep_bad_requested() {
            let bad = sidecar(&path, "badResults");
            match fs::write(&bad, actual) {
                Ok(()) => {
                    debug!(path = %bad.display(), "kept the mismatching results");
                    r.log(&format!("\t: actual results kept in: {}", bad.display()));
                }
                Err(err) => warn!(path = %bad.display(), %err, "could not keep the results"),
            }
        }
        self.log_update_hint(r);
        r.fail("\t: the results do not match the golden file");
        true
    }

    fn update(&self, path: &Path, actual: &[u8]) -> GoldenResult<()> {
        let io = |source| GoldenError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io)?;
        }
        match fs::read(path) {
            Ok(old) if old != actual => {
                let orig = sidecar(path, "orig");
                fs::write(&orig, &old).map_err(io)?;
                debug!(path = %orig.display(), "preserved the previous golden content");
            }
            Ok(_) => return Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(io(err)),
        }
        fs::write(path, actual).map_err(io)?;
        debug!(path = %path.display(), "updated the golden file");
        Ok(())
    }

    fn log_update_hint(&self, r: &mut dyn Reporter) {
        if !self.update_env_var.is_empty() && !self.update_requested() {
            r.log(&format!(
                "\t: set {}=1 and rerun to update the golden file",
                self.update_env_var
            ));
        }
    }
}

fn switch_set(var: &str) -> bool {
    if var.is_empty() {
        return false;
    }
    match env::var(var) {
        Ok(v) => !v.is_empty() && v != "0",
        Err(_) => false,
    }
}

fn sidecar(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(ext);
    path.with_file_name(name)
}

fn read_golden(path: &Path) -> GoldenResult<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(GoldenError::MissingGolden {
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(GoldenError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Render a unified diff of two byte buffers. Binary content falls back to
/// a length note.
fn render_diff(expected: &[u8], actual: &[u8]) -> String {
    let (Ok(exp), Ok(act)) = (std::str::from_utf8(expected), std::str::from_utf8(actual)) else {
        return format!(
            "binary content differs (expected {} bytes, actual {} bytes)",
            expected.len(),
            actual.len()
        );
    };
    let diff = TextDiff::from_lines(exp, act);
    let mut out = String::new();
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => '-',
            ChangeTag::Insert => '+',
            ChangeTag::Equal => ' ',
        };
        out.push(sign);
        out.push_str(change.value().trim_end_matches('\n'));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_check::{test_id, RecordingReporter};
    use tempfile::TempDir;

    fn cfg(dir: &TempDir) -> GoldenFileCfg {
        GoldenFileCfg {
            dir: dir.path().to_path_buf(),
            prefix: "out".to_string(),
            suffix: "txt".to_string(),
            update_env_var: String::new(),
            keep_bad_env_var: String::new(),
        }
    }

    // ----- naming -----

    #[test]
    fn path_name_joins_prefix_name_and_suffix() {
        let cfg = GoldenFileCfg {
            dir: PathBuf::from("/tmp/g"),
            prefix: "out".to_string(),
            suffix: "txt".to_string(),
            ..Default::default()
        };
        assert_eq!(cfg.path_name("case"), PathBuf::from("/tmp/g/out.case.txt"));
    }

    #[test]
    fn empty_prefix_and_suffix_drop_their_dots() {
        let cfg = GoldenFileCfg {
            dir: PathBuf::from("/tmp/g"),
            ..Default::default()
        };
        assert_eq!(cfg.path_name("case"), PathBuf::from("/tmp/g/case"));
    }

    // ----- comparison -----

    #[test]
    fn matching_content_reports_nothing() {
        let dir = TempDir::new().unwrap();
        let cfg = cfg(&dir);
        fs::write(cfg.path_name("a"), b"hello\n").unwrap();

        let mut r = RecordingReporter::new();
        assert!(!cfg.check(&mut r, &test_id!("t"), "a", b"hello\n"));
        assert!(r.lines().is_empty());
    }

    #[test]
    fn mismatch_reports_a_unified_diff() {
        let dir = TempDir::new().unwrap();
        let cfg = cfg(&dir);
        fs::write(cfg.path_name("a"), b"one\ntwo\n").unwrap();

        let mut r = RecordingReporter::new();
        assert!(cfg.check(&mut r, &test_id!("t"), "a", b"one\nTWO\n"));
        assert!(r.saw("-two"));
        assert!(r.saw("+TWO"));
        assert!(r.saw("do not match the golden file"));
    }

    #[test]
    fn missing_golden_file_is_reported_with_a_hint() {
        let dir = TempDir::new().unwrap();
        let mut cfg = cfg(&dir);
        cfg.update_env_var = "ATTEST_TEST_NO_SUCH_SWITCH".to_string();

        let mut r = RecordingReporter::new();
        assert!(cfg.check(&mut r, &test_id!("t"), "a", b"hello\n"));
        assert!(r.saw("does not exist"));
        assert!(r.saw("set ATTEST_TEST_NO_SUCH_SWITCH=1"));
    }

    // ----- update mode -----

    #[test]
    fn update_mode_writes_the_file_and_preserves_the_original() {
        let dir = TempDir::new().unwrap();
        let mut cfg = cfg(&dir);
        cfg.update_env_var = "ATTEST_TEST_UPDATE_GOLDEN".to_string();
        let path = cfg.path_name("a");
        fs::write(&path, b"old\n").unwrap();

        env::set_var(&cfg.update_env_var, "1");
        let mut r = RecordingReporter::new();
        assert!(!cfg.check(&mut r, &test_id!("t"), "a", b"new\n"));
        env::remove_var(&cfg.update_env_var);

        assert_eq!(fs::read(&path).unwrap(), b"new\n");
        assert_eq!(fs::read(sidecar(&path, "orig")).unwrap(), b"old\n");
    }

    #[test]
    fn update_mode_creates_missing_files_and_directories() {
        let dir = TempDir::new().unwrap();
        let mut cfg = cfg(&dir);
        cfg.dir = dir.path().join("nested/golden");
        cfg.update_env_var = "ATTEST_TEST_UPDATE_NESTED".to_string();

        env::set_var(&cfg.update_env_var, "1");
        let mut r = RecordingReporter::new();
        assert!(!cfg.check(&mut r, &test_id!("t"), "a", b"fresh\n"));
        env::remove_var(&cfg.update_env_var);

        assert_eq!(fs::read(cfg.path_name("a")).unwrap(), b"fresh\n");
    }

    // ----- keep-bad mode -----

    #[test]
    fn keep_bad_mode_writes_the_sidecar_on_mismatch() {
        let dir = TempDir::new().unwrap();
        let mut cfg = cfg(&dir);
        cfg.keep_bad_env_var = "ATTEST_TEST_KEEP_BAD".to_string();
        let path = cfg.path_name("a");
        fs::write(&path, b"expected\n").unwrap();

        env::set_var(&cfg.keep_bad_env_var, "1");
        let mut r = RecordingReporter::new();
        assert!(cfg.check(&mut r, &test_id!("t"), "a", b"actual\n"));
        env::remove_var(&cfg.keep_bad_env_var);

        assert_eq!(fs::read(sidecar(&path, "badResults")).unwrap(), b"actual\n");
        assert!(r.saw("actual results kept in"));
    }

    // ----- switches -----

    #[test]
    fn switches_ignore_empty_and_zero_values() {
        assert!(!switch_set(""));
        env::set_var("ATTEST_TEST_SWITCH_ZERO", "0");
        assert!(!switch_set("ATTEST_TEST_SWITCH_ZERO"));
        env::set_var("ATTEST_TEST_SWITCH_ZERO", "yes");
        assert!(switch_set("ATTEST_TEST_SWITCH_ZERO"));
        env::remove_var("ATTEST_TEST_SWITCH_ZERO");
    }

    #[test]
    fn binary_content_gets_a_length_note() {
        let rendered = render_diff(&[0xff, 0xfe], b"text");
        assert!(rendered.contains("binary content differs"));
        assert!(rendered.contains("expected 2 bytes, actual 4 bytes"));
    }
}
