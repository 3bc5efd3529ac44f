//! Output rendering for collected violations.
//!
//! Supports `human` (default) and `json` outputs. The JSON form lists
//! violations in set order together with the summary and input failures.

use crate::config::OutputMode;
use crate::models::{CollectResult, Severity, Violation};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: OutputMode) -> bool {
    output != OutputMode::Json && std::env::var_os("NO_COLOR").is_none()
}

/// Print collected violations in the requested format.
pub fn print_violations(
    res: &CollectResult,
    output: OutputMode,
) -> Result<(), serde_json::Error> {
    match output {
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(&compose_json(res))?),
        OutputMode::Human => {
            let color = use_colors(output);
            for v in res.violations.iter() {
                println!("{}", human_line(v, color));
            }
            for f in &res.failures {
                if color {
                    println!(
                        "{} {} — {}",
                        "✖ ⟦failed⟧".red().bold(),
                        f.file.bold(),
                        f.message
                    );
                } else {
                    println!("✖ ⟦failed⟧ {} — {}", f.file, f.message);
                }
            }
            let s = &res.summary;
            let summary = format!(
                "— Summary — errors={} warnings={} infos={} files={} failed={}",
                s.errors, s.warnings, s.infos, s.files, s.failed
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
    Ok(())
}

/// One line per violation: icon, severity, location, rule, reporter and
/// the first line of the message.
pub fn human_line(v: &Violation, color: bool) -> String {
    let tag = format!("⟦{}⟧", v.severity.as_str());
    let (icon, sev) = match v.severity {
        Severity::Error if color => ("✖".red().to_string(), tag.red().bold().to_string()),
        Severity::Warn if color => ("▲".yellow().to_string(), tag.yellow().bold().to_string()),
        Severity::Info if color => ("◆".blue().to_string(), tag.blue().bold().to_string()),
        Severity::Error => ("✖".to_string(), tag),
        Severity::Warn => ("▲".to_string(), tag),
        Severity::Info => ("◆".to_string(), tag),
    };
    let location = if v.is_file_less() {
        v.file.clone()
    } else {
        format!("{}:{}", v.file, v.start_line)
    };
    let location = if color {
        location.bold().to_string()
    } else {
        location
    };
    let headline = v.message.lines().next().unwrap_or_default();
    format!(
        "{} {} {} ❲{}❳ {} — {}",
        icon, sev, location, v.rule, v.reporter, headline
    )
}

/// Compose the JSON document (pure) for testing/snapshot purposes.
pub fn compose_json(res: &CollectResult) -> JsonVal {
    json!({
        "violations": res.violations,
        "summary": res.summary,
        "failures": res.failures,
    })
}
