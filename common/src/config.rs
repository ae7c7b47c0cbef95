use crate::error::ConfigError;
use serde::Deserialize;
use std::env;

/// Field identifiers the tracking service uses for due-date style changes.
/// The exact names vary between deployments, so both the machine names and
/// the localized labels are listed.
pub const DEFAULT_MILESTONE_FIELDS: &[&str] =
    &["milestone", "limitDate", "dueDate", "period", "date", "期限日"];

/// Field identifiers for assignee changes.
pub const DEFAULT_ASSIGNEE_FIELDS: &[&str] = &["assigner", "assignee", "担当者", "担当"];

/// Projects whose activities are never collected. The generated reports
/// themselves live in a project with this key.
pub const DEFAULT_EXCLUDED_PROJECT_KEYS: &[&str] = &["DAILY_REPORT"];

/// One member a report is generated for, with the issue parameters the
/// delivery step posts under. The pipeline itself only reads `id` and `name`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub issue_type_id: Option<u64>,
    #[serde(default)]
    pub parent_issue_id: Option<u64>,
}

/// Where the daily reports are posted. Pass-through for downstream delivery.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyReportTarget {
    pub project_id: Option<u64>,
    pub members: Vec<Member>,
}

/// Process-wide configuration, loaded once at startup and read-only after.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub excluded_project_keys: Vec<String>,
    pub milestone_fields: Vec<String>,
    pub assignee_fields: Vec<String>,
    pub daily_report: DailyReportTarget,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            excluded_project_keys: to_strings(DEFAULT_EXCLUDED_PROJECT_KEYS),
            milestone_fields: to_strings(DEFAULT_MILESTONE_FIELDS),
            assignee_fields: to_strings(DEFAULT_ASSIGNEE_FIELDS),
            daily_report: DailyReportTarget::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// `EXCLUDED_PROJECT_KEYS`, `MILESTONE_FIELDS` and `ASSIGNEE_FIELDS` are
    /// comma-separated overrides for the defaults above.
    /// `DAILY_REPORT_PROJECT_ID` and `DAILY_REPORT_MEMBERS` (a JSON array of
    /// members) describe the report target.
    pub fn from_env() -> Result<Self, ConfigError> {
        let members = match env::var("DAILY_REPORT_MEMBERS") {
            Ok(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)?,
            _ => Vec::new(),
        };
        let project_id = env::var("DAILY_REPORT_PROJECT_ID")
            .ok()
            .and_then(|raw| raw.trim().parse().ok());

        Ok(Self {
            excluded_project_keys: list_from_env(
                "EXCLUDED_PROJECT_KEYS",
                DEFAULT_EXCLUDED_PROJECT_KEYS,
            ),
            milestone_fields: list_from_env("MILESTONE_FIELDS", DEFAULT_MILESTONE_FIELDS),
            assignee_fields: list_from_env("ASSIGNEE_FIELDS", DEFAULT_ASSIGNEE_FIELDS),
            daily_report: DailyReportTarget {
                project_id,
                members,
            },
        })
    }
}

/// Splits a comma-separated override into trimmed, non-empty entries.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

fn list_from_env(name: &str, defaults: &[&str]) -> Vec<String> {
    match env::var(name) {
        Ok(raw) => {
            let parsed = parse_list(&raw);
            if parsed.is_empty() {
                to_strings(defaults)
            } else {
                parsed
            }
        }
        Err(_) => to_strings(defaults),
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_machine_names_and_labels() {
        let config = AppConfig::default();
        assert!(config.milestone_fields.iter().any(|f| f == "dueDate"));
        assert!(config.milestone_fields.iter().any(|f| f == "期限日"));
        assert!(config.assignee_fields.iter().any(|f| f == "担当者"));
        assert_eq!(config.excluded_project_keys, vec!["DAILY_REPORT"]);
        assert!(config.daily_report.members.is_empty());
    }

    #[test]
    fn parse_list_trims_and_drops_empty_entries() {
        assert_eq!(
            parse_list(" ABC , DEF ,, XYZ "),
            vec!["ABC", "DEF", "XYZ"]
        );
        assert!(parse_list("  ").is_empty());
        assert!(parse_list(",,").is_empty());
    }

    #[test]
    fn members_parse_from_json() {
        let raw = r#"[
            {"id": 9999, "name": "岡本秀", "issueTypeId": 12},
            {"id": 1000, "name": "Sato", "issueTypeId": 12, "parentIssueId": 55}
        ]"#;
        let members: Vec<Member> = serde_json::from_str(raw).expect("valid members json");
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name, "岡本秀");
        assert_eq!(members[0].issue_type_id, Some(12));
        assert_eq!(members[0].parent_issue_id, None);
        assert_eq!(members[1].parent_issue_id, Some(55));
    }

    #[test]
    fn malformed_members_json_is_rejected() {
        let result: Result<Vec<Member>, _> = serde_json::from_str("[{\"id\": \"oops\"}]");
        assert!(result.is_err());
    }
}
