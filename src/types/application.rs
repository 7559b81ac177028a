use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One application as persisted by the portal. Read-only to the scorer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationRecord {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,

    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub owner: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub repo_url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub language: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub framework: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub server_environment: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub auth_profiles: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub data_types: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub facing: Option<String>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub metadata_last_reviewed: Option<DateTime<Utc>>,

    #[serde(deserialize_with = "lenient::text")]
    pub sast_tool: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub sast_integration_level: Option<String>,
    #[serde(rename = "sastNA", deserialize_with = "lenient::flag")]
    pub sast_na: bool,

    #[serde(deserialize_with = "lenient::text")]
    pub dast_tool: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub dast_integration_level: Option<String>,
    #[serde(rename = "dastNA", deserialize_with = "lenient::flag")]
    pub dast_na: bool,

    #[serde(deserialize_with = "lenient::text")]
    pub app_firewall_tool: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub app_firewall_integration_level: Option<String>,
    #[serde(rename = "appFirewallNA", deserialize_with = "lenient::flag")]
    pub app_firewall_na: bool,

    #[serde(deserialize_with = "lenient::text")]
    pub api_security_tool: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub api_security_integration_level: Option<String>,
    #[serde(rename = "apiSecurityNA", deserialize_with = "lenient::flag")]
    pub api_security_na: bool,
}

/// Number of descriptive fields counted towards metadata completeness.
pub const DESCRIPTIVE_FIELD_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolCategory {
    Sast,
    Dast,
    AppFirewall,
    ApiSecurity,
}

impl ToolCategory {
    pub const ALL: [ToolCategory; 4] = [
        ToolCategory::Sast,
        ToolCategory::Dast,
        ToolCategory::AppFirewall,
        ToolCategory::ApiSecurity,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ToolCategory::Sast => "sast",
            ToolCategory::Dast => "dast",
            ToolCategory::AppFirewall => "appFirewall",
            ToolCategory::ApiSecurity => "apiSecurity",
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The three per-category fields of a record, borrowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolSlot<'a> {
    pub tool: Option<&'a str>,
    pub integration_level: Option<&'a str>,
    pub not_applicable: bool,
}

impl ApplicationRecord {
    pub fn descriptive_fields(&self) -> [Option<&str>; DESCRIPTIVE_FIELD_COUNT] {
        [
            self.description.as_deref(),
            self.owner.as_deref(),
            self.repo_url.as_deref(),
            self.language.as_deref(),
            self.framework.as_deref(),
            self.server_environment.as_deref(),
            self.auth_profiles.as_deref(),
            self.data_types.as_deref(),
        ]
    }

    pub fn filled_descriptive_fields(&self) -> usize {
        self.descriptive_fields()
            .iter()
            .filter(|field| is_filled(**field))
            .count()
    }

    pub fn tool_slot(&self, category: ToolCategory) -> ToolSlot<'_> {
        let (tool, integration_level, not_applicable) = match category {
            ToolCategory::Sast => (&self.sast_tool, &self.sast_integration_level, self.sast_na),
            ToolCategory::Dast => (&self.dast_tool, &self.dast_integration_level, self.dast_na),
            ToolCategory::AppFirewall => (
                &self.app_firewall_tool,
                &self.app_firewall_integration_level,
                self.app_firewall_na,
            ),
            ToolCategory::ApiSecurity => (
                &self.api_security_tool,
                &self.api_security_integration_level,
                self.api_security_na,
            ),
        };
        ToolSlot {
            tool: tool.as_deref().filter(|value| !value.is_empty()),
            integration_level: integration_level.as_deref().filter(|value| !value.is_empty()),
            not_applicable,
        }
    }

    /// Comma-separated `dataTypes` entries, trimmed, blanks dropped.
    pub fn data_type_labels(&self) -> impl Iterator<Item = &str> {
        self.data_types
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.id.clone())
            .unwrap_or_else(|| "unnamed".to_string())
    }
}

fn is_filled(field: Option<&str>) -> bool {
    field.map(|value| !value.is_empty()).unwrap_or(false)
}

/// Parses the timestamp shapes the portal stores: RFC 3339, a naive
/// date-time (UTC) or a bare date (UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

mod lenient {
    use super::parse_timestamp;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(value_to_text(Value::deserialize(deserializer)?))
    }

    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(value) => value,
            Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
            Value::String(value) => matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "on" | "1"
            ),
            _ => false,
        })
    }

    pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(raw) => parse_timestamp(&raw),
            Value::Number(number) => number
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis),
            _ => None,
        })
    }

    fn value_to_text(value: Value) -> Option<String> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::Bool(true) => Some("true".to_string()),
            Value::String(value) if value.is_empty() => None,
            Value::String(value) => Some(value),
            Value::Number(number) if number.as_f64() == Some(0.0) => None,
            Value::Number(number) => Some(number.to_string()),
            Value::Array(items) => {
                let parts = items
                    .into_iter()
                    .filter_map(value_to_text)
                    .collect::<Vec<_>>();
                (!parts.is_empty()).then(|| parts.join(", "))
            }
            Value::Object(_) => Some(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn decodes_portal_field_names() {
        let app: ApplicationRecord = serde_json::from_str(
            r#"{
                "id": 7,
                "name": "billing",
                "repoUrl": "https://git.example.com/billing",
                "serverEnvironment": "k8s",
                "dataTypes": "PII, PCI",
                "sastTool": "Semgrep",
                "sastIntegrationLevel": "full",
                "dastNA": true,
                "appFirewallNA": 1,
                "apiSecurityNA": "off",
                "unknownColumn": "ignored"
            }"#,
        )
        .expect("record should decode");

        assert_eq!(app.id.as_deref(), Some("7"));
        assert_eq!(app.repo_url.as_deref(), Some("https://git.example.com/billing"));
        assert!(app.dast_na);
        assert!(app.app_firewall_na);
        assert!(!app.api_security_na);
        assert!(!app.sast_na);
        assert_eq!(
            app.tool_slot(ToolCategory::Sast),
            ToolSlot {
                tool: Some("Semgrep"),
                integration_level: Some("full"),
                not_applicable: false,
            }
        );
    }

    #[test]
    fn falsy_values_count_as_unfilled() {
        let app: ApplicationRecord = serde_json::from_str(
            r#"{
                "description": "",
                "owner": null,
                "language": false,
                "framework": 0,
                "authProfiles": ["sso", "mfa"],
                "repoUrl": "x"
            }"#,
        )
        .expect("record should decode");

        assert_eq!(app.auth_profiles.as_deref(), Some("sso, mfa"));
        assert_eq!(app.filled_descriptive_fields(), 2);
    }

    #[test]
    fn data_type_labels_are_trimmed_and_skip_blanks() {
        let app = ApplicationRecord {
            data_types: Some(" PII ,, PCI,".to_string()),
            ..ApplicationRecord::default()
        };
        assert_eq!(app.data_type_labels().collect::<Vec<_>>(), vec!["PII", "PCI"]);
        assert_eq!(ApplicationRecord::default().data_type_labels().count(), 0);
    }

    #[test]
    fn empty_tool_strings_are_treated_as_missing() {
        let app = ApplicationRecord {
            dast_tool: Some(String::new()),
            dast_integration_level: Some("full".to_string()),
            ..ApplicationRecord::default()
        };
        assert_eq!(app.tool_slot(ToolCategory::Dast).tool, None);
    }

    #[test]
    fn review_timestamp_accepts_common_shapes() {
        let expected = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).single();
        assert_eq!(parse_timestamp("2026-03-01"), expected);
        assert_eq!(parse_timestamp("2026-03-01T00:00:00"), expected);
        assert_eq!(parse_timestamp("2026-03-01 00:00:00"), expected);
        assert_eq!(parse_timestamp("2026-03-01 00:00:00.000"), expected);
        assert_eq!(parse_timestamp("2026-03-01T00:00:00Z"), expected);
        assert_eq!(parse_timestamp("2026-03-01T02:00:00+02:00"), expected);
        assert_eq!(parse_timestamp("last tuesday"), None);

        let from_millis: ApplicationRecord =
            serde_json::from_str(r#"{ "metadataLastReviewed": 1772323200000 }"#)
                .expect("record should decode");
        assert_eq!(from_millis.metadata_last_reviewed, expected);

        let garbage: ApplicationRecord =
            serde_json::from_str(r#"{ "metadataLastReviewed": "soon" }"#)
                .expect("unparseable timestamps should not fail decoding");
        assert_eq!(garbage.metadata_last_reviewed, None);
    }
}
