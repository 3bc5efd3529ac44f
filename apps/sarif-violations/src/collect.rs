//! Collect violations from every report matched by the input patterns.
//!
//! Patterns are resolved relative to the repository root. Reports are parsed
//! in parallel and merged into a single `ViolationSet`; a report that fails
//! to read or decode is recorded as an `InputFailure` and contributes nothing.

use crate::models::{CollectResult, InputFailure, Summary, ViolationSet};
use crate::parse::{parse_file, ParseOptions};
use glob::glob;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Expand `patterns` under `repo_root` into a sorted, duplicate-free file list.
///
/// Invalid patterns are returned as failures instead of aborting expansion.
pub fn expand_patterns(
    repo_root: &Path,
    patterns: &[String],
) -> (Vec<PathBuf>, Vec<InputFailure>) {
    let mut targets: BTreeSet<PathBuf> = BTreeSet::new();
    let mut failures = Vec::new();
    for pat in patterns {
        let abs_glob = repo_root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        match glob(&pattern) {
            Ok(paths) => {
                for path in paths.flatten() {
                    if path.is_file() {
                        targets.insert(path);
                    }
                }
            }
            Err(e) => failures.push(InputFailure {
                file: pat.clone(),
                message: format!("invalid pattern: {}", e),
            }),
        }
    }
    (targets.into_iter().collect(), failures)
}

/// Parse every report matched by `patterns` and merge the violations.
pub fn run_collect(
    repo_root: &Path,
    patterns: &[String],
    options: &ParseOptions,
) -> CollectResult {
    let (targets, mut failures) = expand_patterns(repo_root, patterns);
    info!(files = targets.len(), "parsing SARIF reports");

    let per_file: Vec<(PathBuf, Result<ViolationSet, String>)> = targets
        .par_iter()
        .map(|path| {
            let parsed = parse_file(path, options).map_err(|e| e.to_string());
            (path.clone(), parsed)
        })
        .collect();

    let mut violations = ViolationSet::new();
    let mut files = 0usize;
    for (path, parsed) in per_file {
        match parsed {
            Ok(set) => {
                debug!(file = %path.display(), violations = set.len(), "parsed report");
                violations.merge(set);
                files += 1;
            }
            Err(message) => {
                warn!(file = %path.display(), error = %message, "failed to parse report");
                failures.push(InputFailure {
                    file: path.to_string_lossy().to_string(),
                    message,
                });
            }
        }
    }

    let mut summary = Summary::tally(&violations);
    summary.files = files;
    summary.failed = failures.len();
    CollectResult {
        violations,
        summary,
        failures,
    }
}
