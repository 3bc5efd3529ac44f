//! Configuration discovery and effective settings resolution.
//!
//! Reads `sarif-violations.toml|yaml|yml` from the repository root (or the
//! closest ancestor) and merges it with CLI flags into an `Effective` config.
//! Defaults:
//! - `inputs`: `["**/*.sarif"]`
//! - `output`: `human`
//! - `reporter`: `Sarif`
//! - `fail_on`: `error`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::ConfigError;
use crate::models::{Summary, DEFAULT_REPORTER};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_TOML: &str = "sarif-violations.toml";
const CONFIG_YAML: [&str; 2] = ["sarif-violations.yaml", "sarif-violations.yml"];
const DEFAULT_INPUT: &str = "**/*.sarif";

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `sarif-violations.toml|yaml`.
pub struct AppConfig {
    /// Glob patterns, relative to the repository root.
    pub inputs: Option<Vec<String>>,
    pub output: Option<String>,
    /// Reporter for runs whose tool driver has no name.
    pub reporter: Option<String>,
    /// Lowest severity that makes the run fail: error|warn|info|never.
    pub fail_on: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl FromStr for OutputMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(OutputMode::Human),
            "json" => Ok(OutputMode::Json),
            _ => Err(ConfigError::InvalidValue {
                key: "output",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Severity threshold for a non-zero exit.
pub enum FailOn {
    Error,
    Warn,
    Info,
    Never,
}

impl FailOn {
    /// Whether the summary contains a violation at or above the threshold.
    pub fn is_reached(self, summary: &Summary) -> bool {
        match self {
            FailOn::Error => summary.errors > 0,
            FailOn::Warn => summary.errors + summary.warnings > 0,
            FailOn::Info => summary.errors + summary.warnings + summary.infos > 0,
            FailOn::Never => false,
        }
    }
}

impl FromStr for FailOn {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(FailOn::Error),
            "warn" | "warning" => Ok(FailOn::Warn),
            "info" => Ok(FailOn::Info),
            "never" | "none" => Ok(FailOn::Never),
            _ => Err(ConfigError::InvalidValue {
                key: "fail_on",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub inputs: Vec<String>,
    pub output: OutputMode,
    pub reporter: String,
    pub fail_on: FailOn,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a config file or a `.git` entry is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join(CONFIG_TOML).exists() || CONFIG_YAML.iter().any(|y| cur.join(y).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `AppConfig` from the TOML or YAML file in `root`, if one exists.
pub fn load_config(root: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let toml_path = root.join(CONFIG_TOML);
    if toml_path.exists() {
        let s = read(&toml_path)?;
        let cfg = toml::from_str(&s).map_err(|source| ConfigError::Toml {
            path: toml_path,
            source,
        })?;
        return Ok(Some(cfg));
    }
    for yml in CONFIG_YAML {
        let p = root.join(yml);
        if p.exists() {
            let s = read(&p)?;
            let cfg = serde_yaml::from_str(&s)
                .map_err(|source| ConfigError::Yaml { path: p, source })?;
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// An empty `cli_inputs` means no inputs were given on the command line.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_inputs: &[String],
    cli_output: Option<&str>,
    cli_reporter: Option<&str>,
    cli_fail_on: Option<&str>,
) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let inputs = if !cli_inputs.is_empty() {
        cli_inputs.to_vec()
    } else {
        cfg.inputs
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_INPUT.to_string()])
    };

    let output = match cli_output.map(str::to_string).or(cfg.output) {
        Some(s) => s.parse()?,
        None => OutputMode::Human,
    };

    let reporter = cli_reporter
        .map(str::to_string)
        .or(cfg.reporter)
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_REPORTER.to_string());

    let fail_on = match cli_fail_on.map(str::to_string).or(cfg.fail_on) {
        Some(s) => s.parse()?,
        None => FailOn::Error,
    };

    Ok(Effective {
        repo_root,
        config_found,
        inputs,
        output,
        reporter,
        fail_on,
    })
}
