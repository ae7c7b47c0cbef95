use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One recorded change to an issue field within an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub field: String,
    /// Localized display label for the field, when the service sends one.
    #[serde(default)]
    pub field_text: Option<String>,
    #[serde(default)]
    pub old_value: Option<String>,
    #[serde(default)]
    pub new_value: Option<String>,
    #[serde(rename = "type", default)]
    pub change_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(default)]
    pub content: String,
}

/// Issue payload attached to an activity. The service omits most of these
/// fields for some activity types, so everything tolerates absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub key_id: u64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub comment: Option<Comment>,
    #[serde(default)]
    pub changes: Option<Vec<Change>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    #[serde(rename = "projectKey")]
    pub project_key: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mail_address: Option<String>,
}

/// One recorded event on a tracked issue, as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    pub project: Project,
    #[serde(rename = "type", default)]
    pub type_id: i32,
    #[serde(default)]
    pub content: Content,
    #[serde(rename = "createdUser", default)]
    pub created_user: User,
    /// ISO-8601 creation timestamp, kept as the service sent it.
    #[serde(default)]
    pub created: String,
}

impl Activity {
    /// Calendar-day component of `created` (the part before `T`).
    pub fn created_day(&self) -> &str {
        self.created.split('T').next().unwrap_or_default()
    }
}

/// Activities keyed by project key, in filtering order within each project.
pub type ProjectActivitiesMap = BTreeMap<String, Vec<Activity>>;

/// Partitions activities by project key. Every input activity lands in
/// exactly one group and relative order inside a group is preserved.
pub fn group_by_project(activities: &[Activity]) -> ProjectActivitiesMap {
    let mut grouped = ProjectActivitiesMap::new();
    for activity in activities {
        grouped
            .entry(activity.project.project_key.clone())
            .or_default()
            .push(activity.clone());
    }
    grouped
}

/// The artifact one pipeline run hands to downstream collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityResult {
    pub date: String,
    pub activities: Vec<Activity>,
    pub grouped_by_project: ProjectActivitiesMap,
    pub report: String,
}
