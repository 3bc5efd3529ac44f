//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser)]
#[command(
    name = "sarif-violations",
    version,
    about = "Turn SARIF reports into a de-duplicated violation list",
    long_about = "sarif-violations reads SARIF 2.1.0 reports, projects every result onto its locations and prints one de-duplicated, ordered list of violations.\n\nConfiguration precedence: CLI > sarif-violations.toml > defaults.",
    after_help = "Examples:\n  sarif-violations parse reports/*.sarif\n  sarif-violations parse --output json --fail-on warn\n  sarif-violations parse 'target/**/*.sarif' --reporter clippy",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current sarif-violations version.")]
    Version,
    /// Parse SARIF reports
    #[command(
        about = "Parse SARIF reports into violations",
        long_about = "Expand the given glob patterns (relative to the repository root), parse every matched report and print the merged violations.",
        after_help = "Examples:\n  sarif-violations parse build/*.sarif\n  sarif-violations parse --output json"
    )]
    Parse {
        #[arg(help = "Glob patterns of reports (default: from config or **/*.sarif)")]
        inputs: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Reporter for runs without a tool name (default: Sarif)")]
        reporter: Option<String>,
        #[arg(long, help = "Fail threshold: error|warn|info|never (default: error)")]
        fail_on: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommand_arguments() {
        let cli = Cli::try_parse_from([
            "sarif-violations",
            "-v",
            "parse",
            "a.sarif",
            "b/*.sarif",
            "--output",
            "json",
            "--fail-on",
            "warn",
        ])
        .unwrap();
        assert!(cli.verbosity.is_present());
        match cli.cmd {
            Commands::Parse {
                inputs,
                output,
                fail_on,
                repo_root,
                reporter,
            } => {
                assert_eq!(inputs, vec!["a.sarif", "b/*.sarif"]);
                assert_eq!(output.as_deref(), Some("json"));
                assert_eq!(fail_on.as_deref(), Some("warn"));
                assert!(repo_root.is_none());
                assert!(reporter.is_none());
            }
            Commands::Version => panic!("expected parse"),
        }
    }
}
