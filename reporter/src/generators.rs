use chrono::DateTime;
use daily_report_common::models::{group_by_project, Activity};

const EMPTY_REPORT_MESSAGE: &str = "No activities found for the specified period.";

/// How long a quoted comment line may get before it is cut.
const COMMENT_PREVIEW_CHARS: usize = 80;

/// Renders a filtered activity sequence into report text.
///
/// `generate` must be deterministic for the same input and configuration.
/// Generators that support reconfiguration override `configure` and return
/// true; the default declines, which callers treat as a non-fatal no-op.
pub trait ReportGenerator: Send + Sync {
    fn generate(&self, activities: &[Activity]) -> String;

    fn configure(&mut self, _config: ReportConfig) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    Text,
    #[default]
    Markdown,
    Html,
}

/// How each activity's creation timestamp is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeStyle {
    #[default]
    HourMinute,
    DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    pub time_style: TimeStyle,
}

/// The configurable generator: a title, one section per project in
/// project-key order, one line per activity.
#[derive(Debug, Clone, Default)]
pub struct TemplateReportGenerator {
    config: ReportConfig,
}

impl TemplateReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    fn activity_line(&self, activity: &Activity) -> String {
        format!(
            "{} {}{}",
            format_created(&activity.created, self.config.time_style),
            issue_label(activity),
            activity_detail(activity)
        )
    }
}

impl ReportGenerator for TemplateReportGenerator {
    fn generate(&self, activities: &[Activity]) -> String {
        if activities.is_empty() {
            return EMPTY_REPORT_MESSAGE.to_string();
        }

        let grouped = group_by_project(activities);
        let mut out = String::new();

        match self.config.format {
            ReportFormat::Markdown => {
                out.push_str("# Daily activity report\n");
                for (key, group) in &grouped {
                    out.push_str(&format!("\n## {} ({})\n\n", key, group[0].project.name));
                    for activity in group {
                        out.push_str(&format!("- {}\n", self.activity_line(activity)));
                    }
                }
            }
            ReportFormat::Text => {
                out.push_str("Daily activity report\n");
                for (key, group) in &grouped {
                    out.push_str(&format!("\n[{}] {}\n", key, group[0].project.name));
                    for activity in group {
                        out.push_str(&format!("  * {}\n", self.activity_line(activity)));
                    }
                }
            }
            ReportFormat::Html => {
                out.push_str("<h1>Daily activity report</h1>\n");
                for (key, group) in &grouped {
                    out.push_str(&format!(
                        "<h2>{} ({})</h2>\n<ul>\n",
                        escape_html(key),
                        escape_html(&group[0].project.name)
                    ));
                    for activity in group {
                        out.push_str(&format!(
                            "<li>{}</li>\n",
                            escape_html(&self.activity_line(activity))
                        ));
                    }
                    out.push_str("</ul>\n");
                }
            }
        }

        out
    }

    fn configure(&mut self, config: ReportConfig) -> bool {
        self.config = config;
        true
    }
}

/// Fixed-format generator kept for callers that predate the template
/// generator: a flat markdown list, no per-project sections. Does not
/// support reconfiguration.
#[derive(Debug, Clone, Default)]
pub struct MarkdownReportGenerator;

impl ReportGenerator for MarkdownReportGenerator {
    fn generate(&self, activities: &[Activity]) -> String {
        if activities.is_empty() {
            return EMPTY_REPORT_MESSAGE.to_string();
        }

        let mut out = String::from("# Daily activity report\n\n");
        for activity in activities {
            out.push_str(&format!(
                "- {} {}{}\n",
                format_created(&activity.created, TimeStyle::HourMinute),
                issue_label(activity),
                activity_detail(activity)
            ));
        }
        out
    }
}

/// Issue reference for one activity: `[KEY-12] summary` when the issue key
/// is known, falling back to whatever identifying text is available.
fn issue_label(activity: &Activity) -> String {
    let summary = activity.content.summary.trim();
    if activity.content.key_id > 0 {
        let key = format!(
            "[{}-{}]",
            activity.project.project_key, activity.content.key_id
        );
        if summary.is_empty() {
            key
        } else {
            format!("{} {}", key, summary)
        }
    } else if summary.is_empty() {
        format!("activity {}", activity.id)
    } else {
        summary.to_string()
    }
}

/// What happened: the first line of the comment, or the changed fields.
fn activity_detail(activity: &Activity) -> String {
    if let Some(comment) = &activity.content.comment {
        let text = comment.content.trim();
        if !text.is_empty() {
            let first_line = text.lines().next().unwrap_or_default();
            return format!(": {}", truncate_chars(first_line, COMMENT_PREVIEW_CHARS));
        }
    }

    if let Some(changes) = &activity.content.changes {
        if !changes.is_empty() {
            let fields = changes
                .iter()
                .map(|change| {
                    change
                        .field_text
                        .clone()
                        .unwrap_or_else(|| change.field.clone())
                })
                .collect::<Vec<_>>()
                .join(", ");
            return format!(" (changed: {})", fields);
        }
    }

    String::new()
}

/// Unparseable timestamps render as-is rather than failing the report.
fn format_created(created: &str, style: TimeStyle) -> String {
    match DateTime::parse_from_rfc3339(created) {
        Ok(ts) => match style {
            TimeStyle::HourMinute => ts.format("%H:%M").to_string(),
            TimeStyle::DateTime => ts.format("%Y-%m-%d %H:%M").to_string(),
        },
        Err(_) => created.to_string(),
    }
}

/// Truncation counts characters, not bytes, so multi-byte labels and
/// comments never split mid-character.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
