//! SARIF 2.1.0 schema subset.
//!
//! Only the members needed to project results into violations are modeled;
//! everything else in a report is ignored while decoding. Optional members
//! are `Option`/defaulted so that absence never fails the decode, and the
//! result `level` is decoded tolerantly (see [`Level`]).

use serde::{Deserialize, Deserializer};
use serde_json::Value as Json;

#[derive(Deserialize, Debug, Default)]
/// Top-level SARIF log.
pub struct SarifLog {
    #[serde(default)]
    pub runs: Option<Vec<Run>>,
}

#[derive(Deserialize, Debug, Default)]
/// One execution of an analysis tool.
pub struct Run {
    #[serde(default)]
    pub tool: Option<Tool>,
    #[serde(default)]
    pub artifacts: Option<Vec<Artifact>>,
    #[serde(default)]
    pub results: Option<Vec<SarifResult>>,
}

impl Run {
    /// Tool driver, when the run declares one.
    pub fn driver(&self) -> Option<&ToolComponent> {
        self.tool.as_ref()?.driver.as_ref()
    }

    /// Rule descriptors declared by the driver (empty when absent or null).
    pub fn rules(&self) -> &[ReportingDescriptor] {
        self.driver()
            .and_then(|d| d.rules.as_deref())
            .unwrap_or_default()
    }

    pub fn artifacts(&self) -> &[Artifact] {
        self.artifacts.as_deref().unwrap_or_default()
    }

    pub fn results(&self) -> &[SarifResult] {
        self.results.as_deref().unwrap_or_default()
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct Tool {
    #[serde(default)]
    pub driver: Option<ToolComponent>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ToolComponent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rules: Option<Vec<ReportingDescriptor>>,
}

#[derive(Deserialize, Debug, Default)]
/// A file known to the run, addressed by its position in `run.artifacts`.
pub struct Artifact {
    #[serde(default)]
    pub location: Option<ArtifactLocation>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
/// Static metadata for a rule.
pub struct ReportingDescriptor {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub help: Option<Message>,
    #[serde(default)]
    pub full_description: Option<Message>,
    #[serde(default)]
    pub short_description: Option<Message>,
}

#[derive(Deserialize, Debug, Default)]
/// Plain text with an optional markdown rendering. Used for result and
/// region messages as well as rule help and descriptions.
pub struct Message {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub markdown: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
/// One finding reported by a run.
pub struct SarifResult {
    #[serde(default)]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default, deserialize_with = "deserialize_level")]
    pub level: Level,
    #[serde(default)]
    pub correlation_guid: Option<String>,
    #[serde(default)]
    pub locations: Option<Vec<Location>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub physical_location: Option<PhysicalLocation>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalLocation {
    #[serde(default)]
    pub artifact_location: Option<ArtifactLocation>,
    #[serde(default)]
    pub region: Option<Region>,
}

#[derive(Deserialize, Debug, Default)]
/// Either a direct URI or an index into the run's artifacts.
pub struct ArtifactLocation {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub index: Option<i64>,
}

impl ArtifactLocation {
    /// Classify the reference. An absent index or -1 means the direct URI
    /// applies; any other value, negative ones included, is an index.
    pub fn reference(&self) -> ArtifactRef<'_> {
        match self.index {
            None | Some(-1) => ArtifactRef::Direct(self.uri.as_deref()),
            Some(index) => ArtifactRef::ByIndex(index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a location names its file.
pub enum ArtifactRef<'a> {
    /// Position in the owning run's `artifacts` sequence. Not yet checked
    /// against the sequence, so it may be out of range.
    ByIndex(i64),
    /// URI carried by the location itself.
    Direct(Option<&'a str>),
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    #[serde(default)]
    /// Values below 1 disqualify the location, not the document.
    pub start_line: Option<i64>,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Result severity level.
///
/// `None` doubles as the fallback for absent, unknown or mistyped values.
pub enum Level {
    #[default]
    None,
    Note,
    Warning,
    Error,
}

impl Level {
    /// Map a raw SARIF level string to a known level.
    pub fn from_value(raw: &str) -> Option<Level> {
        match raw {
            "none" => Some(Level::None),
            "note" => Some(Level::Note),
            "warning" => Some(Level::Warning),
            "error" => Some(Level::Error),
            _ => None,
        }
    }

    /// Like [`Level::from_value`] but never fails.
    pub fn from_value_or_default(raw: &str) -> Level {
        Level::from_value(raw).unwrap_or_default()
    }
}

fn deserialize_level<'de, D>(deserializer: D) -> Result<Level, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Json::deserialize(deserializer)?;
    Ok(raw
        .as_str()
        .map(Level::from_value_or_default)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn level_of(value: Json) -> Level {
        let result: SarifResult = serde_json::from_value(json!({ "level": value })).unwrap();
        result.level
    }

    #[test]
    fn test_level_known_values() {
        assert_eq!(level_of(json!("error")), Level::Error);
        assert_eq!(level_of(json!("warning")), Level::Warning);
        assert_eq!(level_of(json!("note")), Level::Note);
        assert_eq!(level_of(json!("none")), Level::None);
    }

    #[test]
    fn test_level_tolerates_unknown_and_mistyped() {
        assert_eq!(level_of(json!("fatal")), Level::None);
        assert_eq!(level_of(json!("ERROR")), Level::None);
        assert_eq!(level_of(json!(3)), Level::None);
        assert_eq!(level_of(json!({ "x": 1 })), Level::None);
        assert_eq!(level_of(Json::Null), Level::None);
        let absent: SarifResult = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.level, Level::None);
    }

    #[test]
    fn test_artifact_reference_kinds() {
        let by_index = ArtifactLocation {
            uri: Some("ignored.c".into()),
            index: Some(2),
        };
        assert_eq!(by_index.reference(), ArtifactRef::ByIndex(2));
        let minus_one = ArtifactLocation {
            uri: Some("a.c".into()),
            index: Some(-1),
        };
        assert_eq!(minus_one.reference(), ArtifactRef::Direct(Some("a.c")));
        let none = ArtifactLocation::default();
        assert_eq!(none.reference(), ArtifactRef::Direct(None));
        let minus_two = ArtifactLocation {
            uri: Some("a.c".into()),
            index: Some(-2),
        };
        assert_eq!(minus_two.reference(), ArtifactRef::ByIndex(-2));
    }

    #[test]
    fn test_null_collections_decode_as_empty() {
        let log: SarifLog = serde_json::from_value(json!({
            "runs": [{
                "tool": { "driver": { "name": "t", "rules": null } },
                "artifacts": null,
                "results": null
            }]
        }))
        .unwrap();
        let run = &log.runs.unwrap()[0];
        assert!(run.rules().is_empty());
        assert!(run.artifacts().is_empty());
        assert!(run.results().is_empty());
    }

    #[test]
    fn test_negative_start_line_decodes() {
        let region: Region = serde_json::from_value(json!({ "startLine": -4 })).unwrap();
        assert_eq!(region.start_line, Some(-4));
    }

    #[test]
    fn test_unknown_members_are_ignored() {
        let log: SarifLog = serde_json::from_value(json!({
            "version": "2.1.0",
            "$schema": "https://example.invalid/sarif.json",
            "runs": [{
                "tool": { "driver": { "name": "clippy", "semanticVersion": "1.0" } },
                "invocations": [{ "executionSuccessful": true }],
                "results": []
            }]
        }))
        .unwrap();
        let runs = log.runs.unwrap();
        assert_eq!(
            runs[0].driver().and_then(|d| d.name.as_deref()),
            Some("clippy")
        );
        assert!(runs[0].rules().is_empty());
    }
}
