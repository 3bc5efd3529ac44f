//! Error types for report parsing and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Structural failures while turning a report into violations.
pub enum ParseError {
    #[error("report is not a valid SARIF document: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("run {run} references artifact index {index} but only {len} artifacts are declared")]
    ArtifactIndex { run: usize, index: i64, len: usize },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
/// Failures while loading `sarif-violations.{toml,yaml,yml}`.
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not valid TOML: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{} is not valid YAML: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid value for `{key}`: {value}")]
    InvalidValue { key: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ParseError>;
