//! Per-run rule metadata lookups.
//!
//! Two maps are built from the driver's rule descriptors, both keyed by
//! rule id and both skipping descriptors without a non-empty id:
//! - `help`: supplemental guidance appended to location-based messages.
//! - `descriptions`: synthesized text for results that have no location.

use crate::models::sarif::{Message, ReportingDescriptor, Run};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RuleIndex {
    help: HashMap<String, String>,
    descriptions: HashMap<String, String>,
}

impl RuleIndex {
    pub fn from_run(run: &Run) -> Self {
        let mut index = RuleIndex::default();
        for rule in run.rules() {
            let Some(id) = non_empty(rule.id.as_deref()) else {
                continue;
            };
            if let Some(help) = help_text(rule) {
                index.help.insert(id.to_string(), help.to_string());
            }
            index
                .descriptions
                .insert(id.to_string(), description_text(id, rule));
        }
        index
    }

    pub fn help(&self, rule_id: &str) -> Option<&str> {
        self.help.get(rule_id).map(String::as_str)
    }

    pub fn description(&self, rule_id: &str) -> Option<&str> {
        self.descriptions.get(rule_id).map(String::as_str)
    }
}

/// First non-empty of help (markdown, text), full description
/// (markdown, text), then name.
fn help_text(rule: &ReportingDescriptor) -> Option<&str> {
    let help = rule.help.as_ref();
    let full = rule.full_description.as_ref();
    [
        help.and_then(|m| m.markdown.as_deref()),
        help.and_then(|m| m.text.as_deref()),
        full.and_then(|m| m.markdown.as_deref()),
        full.and_then(|m| m.text.as_deref()),
        rule.name.as_deref(),
    ]
    .into_iter()
    .find_map(non_empty)
}

/// `id[: name][\n\nshort description]`, markdown preferred for the description.
fn description_text(id: &str, rule: &ReportingDescriptor) -> String {
    let mut out = String::from(id);
    if let Some(name) = non_empty(rule.name.as_deref()) {
        out.push_str(": ");
        out.push_str(name);
    }
    if let Some(short) = rule.short_description.as_ref().and_then(preferred_text) {
        out.push_str("\n\n");
        out.push_str(short);
    }
    out
}

fn preferred_text(message: &Message) -> Option<&str> {
    non_empty(message.markdown.as_deref()).or_else(|| non_empty(message.text.as_deref()))
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run_with_rules(rules: serde_json::Value) -> Run {
        serde_json::from_value(json!({
            "tool": { "driver": { "name": "t", "rules": rules } }
        }))
        .unwrap()
    }

    #[test]
    fn test_help_precedence() {
        let run = run_with_rules(json!([
            { "id": "a", "name": "A", "help": { "text": "help text", "markdown": "help md" },
              "fullDescription": { "text": "full" } },
            { "id": "b", "name": "B", "help": { "text": "help text" },
              "fullDescription": { "markdown": "full md" } },
            { "id": "c", "name": "C", "help": { "markdown": "" },
              "fullDescription": { "markdown": "full md", "text": "full" } },
            { "id": "d", "name": "D", "fullDescription": { "text": "full" } },
            { "id": "e", "name": "E" },
            { "id": "f" }
        ]));
        let index = RuleIndex::from_run(&run);
        assert_eq!(index.help("a"), Some("help md"));
        assert_eq!(index.help("b"), Some("help text"));
        assert_eq!(index.help("c"), Some("full md"));
        assert_eq!(index.help("d"), Some("full"));
        assert_eq!(index.help("e"), Some("E"));
        assert_eq!(index.help("f"), None);
    }

    #[test]
    fn test_description_composition() {
        let run = run_with_rules(json!([
            {
                "id": "a",
                "name": "Alpha",
                "shortDescription": { "text": "t", "markdown": "**md**" }
            },
            { "id": "b", "shortDescription": { "text": "plain", "markdown": "" } },
            { "id": "c", "name": "" }
        ]));
        let index = RuleIndex::from_run(&run);
        assert_eq!(index.description("a"), Some("a: Alpha\n\n**md**"));
        assert_eq!(index.description("b"), Some("b\n\nplain"));
        assert_eq!(index.description("c"), Some("c"));
        assert_eq!(index.description("missing"), None);
    }

    #[test]
    fn test_rules_without_id_are_excluded() {
        let run = run_with_rules(json!([
            { "name": "nameless", "help": { "text": "h" } },
            { "id": "", "name": "empty id", "help": { "text": "h" } }
        ]));
        let index = RuleIndex::from_run(&run);
        assert!(index.help.is_empty());
        assert!(index.descriptions.is_empty());
    }

    #[test]
    fn test_run_without_driver_has_empty_index() {
        let index = RuleIndex::from_run(&Run::default());
        assert_eq!(index.help("x"), None);
        assert_eq!(index.description("x"), None);
    }
}
