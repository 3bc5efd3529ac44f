//! SARIF report parsing: decode a document and project its results into
//! a de-duplicated `ViolationSet`.
//!
//! Per run, a `RuleIndex` and a reporter name are resolved once. Each
//! result then yields one violation per location that has a region with a
//! start line, or a single file-less violation when it has no locations at
//! all. Results without message text produce nothing.

use crate::error::{ParseError, Result};
use crate::message::{compose_location_message, compose_no_location_message, extract_message};
use crate::models::sarif::{
    Artifact, ArtifactLocation, ArtifactRef, Level, Run, SarifLog, SarifResult,
};
use crate::models::{
    Parser, Severity, Violation, ViolationSet, DEFAULT_REPORTER, NO_FILE, NO_LINE,
    SARIF_RESULTS_CORRELATION_GUID,
};
use crate::rules::RuleIndex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
/// Knobs for parsing that sit outside the report itself.
pub struct ParseOptions {
    /// Reporter used for runs whose driver has no usable name.
    pub default_reporter: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_reporter: DEFAULT_REPORTER.to_string(),
        }
    }
}

/// Decode raw report text into the SARIF schema subset.
pub fn decode(content: &str) -> Result<SarifLog> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a report with default options.
pub fn parse_report_output(content: &str) -> Result<ViolationSet> {
    parse_report_output_with(content, &ParseOptions::default())
}

/// Parse a report into violations.
///
/// A document without `runs` yields an empty set. Malformed JSON, type
/// mismatches and artifact indexes outside the run's artifacts are errors.
pub fn parse_report_output_with(content: &str, options: &ParseOptions) -> Result<ViolationSet> {
    let log = decode(content)?;
    let mut violations = ViolationSet::new();
    let Some(runs) = log.runs else {
        return Ok(violations);
    };
    for (run_idx, run) in runs.iter().enumerate() {
        let reporter = resolve_reporter(run, &options.default_reporter);
        let rules = RuleIndex::from_run(run);
        trace!(
            run = run_idx,
            reporter = %reporter,
            results = run.results().len(),
            "projecting run"
        );
        for result in run.results() {
            project_result(run_idx, run, &rules, &reporter, result, &mut violations)?;
        }
    }
    Ok(violations)
}

/// Read and parse a report from disk.
pub fn parse_file(path: &Path, options: &ParseOptions) -> Result<ViolationSet> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_report_output_with(&content, options)
}

/// Driver name when present and not blank, otherwise the default.
fn resolve_reporter(run: &Run, default_reporter: &str) -> String {
    run.driver()
        .and_then(|d| d.name.as_deref())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(default_reporter)
        .to_string()
}

fn project_result(
    run_idx: usize,
    run: &Run,
    rules: &RuleIndex,
    reporter: &str,
    result: &SarifResult,
    out: &mut ViolationSet,
) -> Result<()> {
    let rule_id = result.rule_id.as_deref().unwrap_or_default();
    let message = extract_message(result.message.as_ref()).filter(|m| !m.is_empty());
    let Some(message) = message else {
        debug!(run = run_idx, rule = rule_id, "skipping result without message");
        return Ok(());
    };
    let severity = to_severity(result.level);
    let specifics = specifics_of(result);

    let locations = result.locations.as_deref().unwrap_or_default();
    if locations.is_empty() {
        out.insert(Violation {
            parser: Parser::Sarif,
            file: NO_FILE.to_string(),
            start_line: NO_LINE,
            rule: rule_id.to_string(),
            message: compose_no_location_message(rules.description(rule_id), message),
            severity,
            reporter: reporter.to_string(),
            specifics,
        });
        return Ok(());
    }

    for location in locations {
        let Some(physical) = location.physical_location.as_ref() else {
            debug!(
                run = run_idx,
                rule = rule_id,
                "skipping location without physical location"
            );
            continue;
        };
        let Some(region) = physical.region.as_ref() else {
            debug!(run = run_idx, rule = rule_id, "skipping location without region");
            continue;
        };
        let Some(line) = region.start_line else {
            debug!(run = run_idx, rule = rule_id, "skipping region without start line");
            continue;
        };
        if line < 1 {
            debug!(run = run_idx, rule = rule_id, line, "skipping non-positive start line");
            continue;
        }
        let start_line = line as u64;
        let file = resolve_file(
            run_idx,
            run.artifacts(),
            physical.artifact_location.as_ref(),
        )?;
        let text = compose_location_message(
            message,
            extract_message(region.message.as_ref()),
            rules.help(rule_id),
        );
        out.insert(Violation {
            parser: Parser::Sarif,
            file,
            start_line,
            rule: rule_id.to_string(),
            message: text,
            severity,
            reporter: reporter.to_string(),
            specifics: specifics.clone(),
        });
    }
    Ok(())
}

/// Resolve a location's file against the run's artifacts. A missing URI
/// degrades to `NO_FILE`.
fn resolve_file(
    run_idx: usize,
    artifacts: &[Artifact],
    location: Option<&ArtifactLocation>,
) -> Result<String> {
    let reference = location
        .map(ArtifactLocation::reference)
        .unwrap_or(ArtifactRef::Direct(None));
    let uri = match reference {
        ArtifactRef::ByIndex(index) => {
            let artifact = usize::try_from(index)
                .ok()
                .and_then(|i| artifacts.get(i))
                .ok_or(ParseError::ArtifactIndex {
                    run: run_idx,
                    index,
                    len: artifacts.len(),
                })?;
            artifact.location.as_ref().and_then(|l| l.uri.as_deref())
        }
        ArtifactRef::Direct(uri) => uri,
    };
    Ok(uri.unwrap_or(NO_FILE).to_string())
}

fn specifics_of(result: &SarifResult) -> BTreeMap<String, String> {
    let mut specifics = BTreeMap::new();
    if let Some(guid) = result.correlation_guid.as_deref().filter(|g| !g.is_empty()) {
        specifics.insert(SARIF_RESULTS_CORRELATION_GUID.to_string(), guid.to_string());
    }
    specifics
}

pub fn to_severity(level: Level) -> Severity {
    match level {
        Level::Error => Severity::Error,
        Level::Warning => Severity::Warn,
        _ => Severity::Info,
    }
}
