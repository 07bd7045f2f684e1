//! Traversal location for one comparison call.
//!
//! A `Trail` carries the display path and the raw name segments used for
//! ignore matching, both cloned on descent so sibling branches never see
//! each other's extensions. The visited set is shared by reference down the
//! call tree: cycle detection must be global to the single comparison.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use attest_value::{Kind, MapKey};

/// Hard ceiling on recursion depth. Exceeding it means a cycle evaded the
/// visited set, which is a defect in the differ, not in the values under
/// test.
const MAX_DEPTH: usize = 1000;

#[derive(Clone, Debug)]
pub(crate) struct Trail {
    depth: usize,
    path: String,
    segments: Vec<String>,
    ignore: Rc<Vec<Vec<String>>>,
    visited: Rc<RefCell<HashSet<(usize, usize, Kind)>>>,
}

impl Trail {
    pub(crate) fn new(ignore: &[Vec<String>]) -> Self {
        Trail {
            depth: 0,
            path: "this".to_string(),
            segments: Vec::new(),
            ignore: Rc::new(ignore.to_vec()),
            visited: Rc::new(RefCell::new(HashSet::new())),
        }
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    /// Descend into a named record member. The name joins both the display
    /// path and the raw segments used for ignore matching.
    pub(crate) fn field(&self, name: &str) -> Trail {
        let mut next = self.clone();
        next.path.push('.');
        next.path.push_str(name);
        next.segments.push(name.to_string());
        next
    }

    /// Descend into a sequence position. Display only: indices do not
    /// participate in name-based ignore matching.
    pub(crate) fn index(&self, i: usize) -> Trail {
        let mut next = self.clone();
        next.path.push_str(&format!("[{i}]"));
        next
    }

    /// Descend into a map entry. Display only, like indices.
    pub(crate) fn key(&self, key: &MapKey) -> Trail {
        let mut next = self.clone();
        next.path.push_str(&format!("[{key}]"));
        next
    }

    /// Count one recursion step, aborting past the ceiling.
    pub(crate) fn bump(&mut self) {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            panic!("{}: undetected loop", self.path);
        }
    }

    /// Returns `true` if any ignore rule is a prefix of the raw segments
    /// accumulated so far.
    pub(crate) fn skipped(&self) -> bool {
        self.ignore.iter().any(|rule| {
            rule.len() <= self.segments.len()
                && rule.iter().zip(self.segments.iter()).all(|(r, s)| r == s)
        })
    }

    /// Returns `true` if the two addresses are the same, or if this exact
    /// (address-pair, kind) triple was already visited. Records the triple
    /// on first sight. Zero addresses are never recorded and never match.
    pub(crate) fn must_be_equal(&self, act: usize, exp: usize, kind: Kind) -> bool {
        if act == exp {
            return true;
        }
        if act == 0 || exp == 0 {
            return false;
        }
        !self.visited.borrow_mut().insert((act, exp, kind))
    }
}
