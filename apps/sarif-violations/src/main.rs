//! sarif-violations CLI binary entry point.
//! Resolves configuration, collects violations and prints results.

use clap::Parser;
use sarif_violations::cli::{Cli, Commands};
use sarif_violations::parse::ParseOptions;
use sarif_violations::{collect, config, output, utils};
use tracing_subscriber::EnvFilter;

fn init_logging(cli: &Cli) {
    let filter = if cli.verbosity.is_present() {
        EnvFilter::new(cli.verbosity.tracing_level_filter().to_string())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(cli.verbosity.tracing_level_filter().to_string()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Parse {
            inputs,
            repo_root,
            output,
            reporter,
            fail_on,
        } => {
            let eff = match config::resolve_effective(
                repo_root.as_deref(),
                &inputs,
                output.as_deref(),
                reporter.as_deref(),
                fail_on.as_deref(),
            ) {
                Ok(eff) => eff,
                Err(e) => {
                    eprintln!("{} {}", utils::error_prefix(), e);
                    std::process::exit(2);
                }
            };
            if !eff.config_found && eff.output == config::OutputMode::Human {
                eprintln!(
                    "{} No sarif-violations.toml found; using defaults.",
                    utils::note_prefix()
                );
            }
            let options = ParseOptions {
                default_reporter: eff.reporter.clone(),
            };
            let result = collect::run_collect(&eff.repo_root, &eff.inputs, &options);
            if result.summary.files == 0 && result.failures.is_empty() {
                eprintln!(
                    "{} No SARIF reports matched [{}] under {}",
                    utils::error_prefix(),
                    eff.inputs.join(", "),
                    eff.repo_root.display()
                );
                std::process::exit(2);
            }
            if let Err(e) = output::print_violations(&result, eff.output) {
                eprintln!("{} {}", utils::error_prefix(), e);
                std::process::exit(2);
            }
            if !result.failures.is_empty() || eff.fail_on.is_reached(&result.summary) {
                std::process::exit(1);
            }
        }
    }
}
