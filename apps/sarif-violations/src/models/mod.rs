//! Shared data models: the SARIF input subset and the violation output.

pub mod sarif;
pub mod violation_set;

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub use violation_set::ViolationSet;

/// File sentinel for findings that are not tied to a location.
pub const NO_FILE: &str = "-";
/// Line sentinel for findings that are not tied to a location.
pub const NO_LINE: u64 = 0;
/// Reporter used when a run does not name its tool driver.
pub const DEFAULT_REPORTER: &str = "Sarif";
/// Specifics key holding a result's `correlationGuid`.
pub const SARIF_RESULTS_CORRELATION_GUID: &str = "correlationGuid";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
/// Report format a violation was parsed from.
pub enum Parser {
    Sarif,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
/// Normalized violation severity, ordered from least to most severe.
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// A single normalized finding.
pub struct Violation {
    pub parser: Parser,
    pub file: String,
    pub start_line: u64,
    pub rule: String,
    pub message: String,
    pub severity: Severity,
    pub reporter: String,
    pub specifics: BTreeMap<String, String>,
}

impl Violation {
    /// True when the violation is not attached to any file.
    pub fn is_file_less(&self) -> bool {
        self.file == NO_FILE && self.start_line == NO_LINE
    }
}

impl Ord for Violation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parser
            .cmp(&other.parser)
            .then_with(|| self.file.cmp(&other.file))
            .then_with(|| self.start_line.cmp(&other.start_line))
            .then_with(|| self.rule.cmp(&other.rule))
            .then_with(|| self.message.cmp(&other.message))
            .then_with(|| self.severity.cmp(&other.severity))
            .then_with(|| self.reporter.cmp(&other.reporter))
            .then_with(|| self.specifics.cmp(&other.specifics))
    }
}

impl PartialOrd for Violation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
/// Aggregated counts used by printers and exit-code decisions.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub files: usize,
    pub failed: usize,
}

impl Summary {
    /// Count violations by severity; `files` and `failed` are left to the caller.
    pub fn tally(violations: &ViolationSet) -> Self {
        let mut summary = Summary::default();
        for v in violations.iter() {
            match v.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warn => summary.warnings += 1,
                Severity::Info => summary.infos += 1,
            }
        }
        summary
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// A report that could not be turned into violations.
pub struct InputFailure {
    pub file: String,
    pub message: String,
}

#[derive(Serialize, Debug, Default)]
/// Collector output: merged violations plus per-file failures.
pub struct CollectResult {
    pub violations: ViolationSet,
    pub summary: Summary,
    pub failures: Vec<InputFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(file: &str, line: u64, severity: Severity) -> Violation {
        Violation {
            parser: Parser::Sarif,
            file: file.into(),
            start_line: line,
            rule: "r".into(),
            message: "m".into(),
            severity,
            reporter: DEFAULT_REPORTER.into(),
            specifics: BTreeMap::new(),
        }
    }

    #[test]
    fn test_ordering_follows_file_then_line() {
        let a = violation("a.rs", 10, Severity::Error);
        let b = violation("a.rs", 2, Severity::Info);
        let c = violation("b.rs", 1, Severity::Info);
        assert!(b < a);
        assert!(a < c);
    }

    #[test]
    fn test_specifics_take_part_in_equality() {
        let a = violation("a.rs", 1, Severity::Warn);
        let mut b = a.clone();
        assert_eq!(a.cmp(&b), Ordering::Equal);
        b.specifics
            .insert(SARIF_RESULTS_CORRELATION_GUID.into(), "guid-1".into());
        assert_ne!(a.cmp(&b), Ordering::Equal);
        assert_ne!(a, b);
    }

    #[test]
    fn test_severity_serializes_uppercase() {
        let v = serde_json::to_value(violation("-", 0, Severity::Warn)).unwrap();
        assert_eq!(v["severity"], "WARN");
        assert_eq!(v["parser"], "SARIF");
        assert_eq!(v["startLine"], 0);
    }

    #[test]
    fn test_summary_tally_counts_by_severity() {
        let mut set = ViolationSet::new();
        set.insert(violation("a", 1, Severity::Error));
        set.insert(violation("a", 2, Severity::Warn));
        set.insert(violation("a", 3, Severity::Warn));
        set.insert(violation("a", 4, Severity::Info));
        let s = Summary::tally(&set);
        assert_eq!((s.errors, s.warnings, s.infos), (1, 2, 1));
    }
}
