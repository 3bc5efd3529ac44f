//! Order-preserving, duplicate-free violation collection.
//!
//! Keeps at most one representative per distinct field tuple. Iteration
//! follows the total order defined on `Violation`, so the same findings
//! always come out in the same order no matter how they were inserted.

use super::Violation;
use serde::Serialize;
use std::collections::btree_set;
use std::collections::BTreeSet;

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ViolationSet {
    inner: BTreeSet<Violation>,
}

impl ViolationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a violation. Returns false when an equal one is already present.
    pub fn insert(&mut self, violation: Violation) -> bool {
        self.inner.insert(violation)
    }

    /// Move every violation of `other` into this set.
    pub fn merge(&mut self, other: ViolationSet) {
        self.inner.extend(other.inner);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains(&self, violation: &Violation) -> bool {
        self.inner.contains(violation)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Violation> {
        self.inner.iter()
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.inner.into_iter().collect()
    }
}

impl Extend<Violation> for ViolationSet {
    fn extend<I: IntoIterator<Item = Violation>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl FromIterator<Violation> for ViolationSet {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ViolationSet {
    type Item = Violation;
    type IntoIter = btree_set::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a ViolationSet {
    type Item = &'a Violation;
    type IntoIter = btree_set::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Parser, Severity, DEFAULT_REPORTER};
    use std::collections::BTreeMap;

    fn at(file: &str, line: u64) -> Violation {
        Violation {
            parser: Parser::Sarif,
            file: file.into(),
            start_line: line,
            rule: "no-unused-vars".into(),
            message: "'x' is unused".into(),
            severity: Severity::Warn,
            reporter: DEFAULT_REPORTER.into(),
            specifics: BTreeMap::new(),
        }
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut set = ViolationSet::new();
        assert!(set.insert(at("src/a.js", 5)));
        assert!(!set.insert(at("src/a.js", 5)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iteration_order_independent_of_insertion() {
        let forward: ViolationSet = vec![at("b.js", 1), at("a.js", 9), at("a.js", 3)]
            .into_iter()
            .collect();
        let mut backward = ViolationSet::new();
        backward.extend(vec![at("a.js", 3), at("a.js", 9), at("b.js", 1), at("a.js", 9)]);
        assert_eq!(forward, backward);
        let lines: Vec<_> = forward.iter().map(|v| (v.file.as_str(), v.start_line)).collect();
        assert_eq!(lines, vec![("a.js", 3), ("a.js", 9), ("b.js", 1)]);
    }

    #[test]
    fn test_merge_collapses_shared_entries() {
        let mut left: ViolationSet = vec![at("a.js", 1), at("a.js", 2)].into_iter().collect();
        let right: ViolationSet = vec![at("a.js", 2), at("a.js", 3)].into_iter().collect();
        left.merge(right);
        assert_eq!(left.len(), 3);
        assert!(left.contains(&at("a.js", 3)));
    }

    #[test]
    fn test_serializes_as_array() {
        let set: ViolationSet = vec![at("a.js", 1)].into_iter().collect();
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["file"], "a.js");
    }
}
