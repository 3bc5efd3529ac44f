//! Message text extraction and composition.

use crate::models::sarif::Message;

/// Label introducing rule help in location-based messages.
pub const HELP_LABEL: &str = "For additional help see: ";

const SEPARATOR: &str = "\n\n";

/// Message text, favoring markdown. An empty markdown falls back to the
/// plain text, which itself may be absent or empty.
pub fn extract_message(message: Option<&Message>) -> Option<&str> {
    let message = message?;
    match message.markdown.as_deref() {
        Some(md) if !md.is_empty() => Some(md),
        _ => message.text.as_deref(),
    }
}

/// Message for a violation attached to a location: the primary text, the
/// region's own message and the rule help, separated by blank lines.
pub fn compose_location_message(
    primary: &str,
    region_message: Option<&str>,
    help: Option<&str>,
) -> String {
    let mut out = String::from(primary);
    if let Some(region) = region_message {
        out.push_str(SEPARATOR);
        out.push_str(region);
    }
    if let Some(help) = help {
        out.push_str(SEPARATOR);
        out.push_str(HELP_LABEL);
        out.push_str(help);
    }
    out.trim().to_string()
}

/// Message for a violation without location: the rule description, with
/// the primary text appended unless the description already contains it.
/// The separator is written even when there is no description, so such
/// messages start with a blank line.
pub fn compose_no_location_message(description: Option<&str>, primary: &str) -> String {
    let mut out = String::from(description.unwrap_or_default());
    if !out.contains(primary) {
        out.push_str(SEPARATOR);
        out.push_str(primary);
    }
    out
}
