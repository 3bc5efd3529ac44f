//! sarif-violations core library.
//!
//! Turns SARIF 2.1.0 reports into flat, de-duplicated collections of
//! normalized violations.
//!
//! High-level modules:
//! - `parse`: Decode a report and project its results into violations.
//! - `rules`: Per-run rule help and description lookups.
//! - `message`: Message extraction and composition.
//! - `models`: SARIF schema subset, `Violation` and `ViolationSet`.
//! - `collect`: Parse many reports matched by glob patterns and merge them.
//! - `config`: Discovery and effective configuration resolution.
//! - `output`: Human/JSON printers.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `error`: Parse and configuration errors.
//!
//! ```
//! let set = sarif_violations::parse::parse_report_output(r#"{"runs": []}"#).unwrap();
//! assert!(set.is_empty());
//! ```
pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod message;
pub mod models;
pub mod output;
pub mod parse;
pub mod rules;
pub mod utils;

pub use error::{ConfigError, ParseError};
pub use models::{Severity, Violation, ViolationSet};
pub use parse::{parse_report_output, parse_report_output_with, ParseOptions};
