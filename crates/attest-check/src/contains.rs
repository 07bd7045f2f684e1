//! Substring containment checks over multi-part expectations.

use crate::id::TestId;
use crate::report::Reporter;

/// Returns the expectation parts that `text` does not contain, in order.
pub fn missing_parts<'a, S: AsRef<str>>(text: &str, parts: &'a [S]) -> Vec<&'a str> {
    parts
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| !text.contains(p))
        .collect()
}

/// Check that `text` contains every part, reporting anything missing.
/// Returns `true` when a missing part was reported.
pub fn should_contain<S: AsRef<str>>(
    r: &mut dyn Reporter,
    id: &TestId,
    desc: &str,
    text: &str,
    parts: &[S],
) -> bool {
    let missing = missing_parts(text, parts);
    if missing.is_empty() {
        return false;
    }
    r.log(&id.to_string());
    r.log(&format!("\t: the {desc}: {text:?}"));
    for part in &missing {
        r.log(&format!("\t: should contain: {part:?}"));
    }
    r.fail(&format!("\t: the {desc} is incorrect"));
    true
}
