use daily_report_common::config::AppConfig;
use daily_report_common::models::{Activity, Change};

/// A boolean test over one activity.
///
/// Atomic variants carry their own configuration; `And`/`Or`/`Not` own their
/// children, so any two filters compose without knowledge of each other's
/// logic. Evaluation is side-effect free and independent of call order.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityFilter {
    /// Passes activities carrying a comment with non-blank text.
    HasComment,
    /// Drops activities whose project key is on the exclusion list.
    /// Matching is exact and case-sensitive.
    ExcludeProject { excluded_keys: Vec<String> },
    /// Passes activities whose change set is more than milestone or
    /// assignee shuffling.
    MeaningfulChange {
        milestone_fields: Vec<String>,
        assignee_fields: Vec<String>,
    },
    /// All children pass. Empty is vacuously true.
    And(Vec<ActivityFilter>),
    /// At least one child passes. Empty is false.
    Or(Vec<ActivityFilter>),
    Not(Box<ActivityFilter>),
}

impl ActivityFilter {
    pub fn evaluate(&self, activity: &Activity) -> bool {
        match self {
            ActivityFilter::HasComment => activity
                .content
                .comment
                .as_ref()
                .map_or(false, |comment| !comment.content.trim().is_empty()),
            ActivityFilter::ExcludeProject { excluded_keys } => !excluded_keys
                .iter()
                .any(|key| key == &activity.project.project_key),
            ActivityFilter::MeaningfulChange {
                milestone_fields,
                assignee_fields,
            } => match activity.content.changes.as_deref() {
                None => false,
                Some(changes) if changes.is_empty() => false,
                Some(changes) => !is_non_meaningful(changes, milestone_fields, assignee_fields),
            },
            ActivityFilter::And(children) => {
                children.iter().all(|child| child.evaluate(activity))
            }
            ActivityFilter::Or(children) => {
                children.iter().any(|child| child.evaluate(activity))
            }
            ActivityFilter::Not(child) => !child.evaluate(activity),
        }
    }

    /// The composition the service uses unless a caller supplies its own:
    /// not in an excluded project, and either commented or carrying a
    /// meaningful change.
    pub fn default_for(config: &AppConfig) -> ActivityFilter {
        ActivityFilter::And(vec![
            ActivityFilter::Or(vec![
                ActivityFilter::HasComment,
                ActivityFilter::MeaningfulChange {
                    milestone_fields: config.milestone_fields.clone(),
                    assignee_fields: config.assignee_fields.clone(),
                },
            ]),
            ActivityFilter::ExcludeProject {
                excluded_keys: config.excluded_project_keys.clone(),
            },
        ])
    }
}

/// A change set is noise when it is a lone milestone/assignee edit, or when
/// every change is a milestone edit, or every change an assignee edit.
/// Mixed sets count as meaningful.
fn is_non_meaningful(
    changes: &[Change],
    milestone_fields: &[String],
    assignee_fields: &[String],
) -> bool {
    if changes.is_empty() {
        return false;
    }

    if let [change] = changes {
        return field_in_list(change, milestone_fields) || field_in_list(change, assignee_fields);
    }

    let only_milestone = changes
        .iter()
        .all(|change| field_in_list(change, milestone_fields));
    let only_assignee = changes
        .iter()
        .all(|change| field_in_list(change, assignee_fields));

    only_milestone || only_assignee
}

/// Either the machine field identifier or the localized label may be listed.
fn field_in_list(change: &Change, fields: &[String]) -> bool {
    fields.iter().any(|field| field == &change.field)
        || change
            .field_text
            .as_ref()
            .map_or(false, |text| fields.iter().any(|field| field == text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{change, change_activity, comment_activity, labeled_change};
    use daily_report_common::config::AppConfig;

    fn meaningful_change() -> ActivityFilter {
        let config = AppConfig::default();
        ActivityFilter::MeaningfulChange {
            milestone_fields: config.milestone_fields,
            assignee_fields: config.assignee_fields,
        }
    }

    fn exclude(keys: &[&str]) -> ActivityFilter {
        ActivityFilter::ExcludeProject {
            excluded_keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn absent_or_empty_changes_are_not_meaningful() {
        let filter = meaningful_change();
        assert!(!filter.evaluate(&comment_activity(1, "ABC", "note")));
        assert!(!filter.evaluate(&change_activity(2, "ABC", vec![])));
    }

    #[test]
    fn lone_milestone_change_is_noise() {
        let filter = meaningful_change();
        assert!(!filter.evaluate(&change_activity(1, "ABC", vec![change("dueDate")])));
        assert!(!filter.evaluate(&change_activity(2, "ABC", vec![change("milestone")])));
    }

    #[test]
    fn lone_assignee_change_is_noise() {
        let filter = meaningful_change();
        assert!(!filter.evaluate(&change_activity(1, "ABC", vec![change("assignee")])));
    }

    #[test]
    fn localized_label_matches_too() {
        let filter = meaningful_change();
        let activity = change_activity(1, "ABC", vec![labeled_change("customField_12", "期限日")]);
        assert!(!filter.evaluate(&activity));
    }

    #[test]
    fn lone_unrelated_change_is_meaningful() {
        let filter = meaningful_change();
        assert!(filter.evaluate(&change_activity(1, "ABC", vec![change("status")])));
    }

    #[test]
    fn mixed_change_set_is_meaningful() {
        let filter = meaningful_change();
        let activity = change_activity(1, "ABC", vec![change("dueDate"), change("status")]);
        assert!(filter.evaluate(&activity));
    }

    #[test]
    fn uniform_milestone_or_assignee_sets_are_noise() {
        let filter = meaningful_change();
        let milestones = change_activity(1, "ABC", vec![change("dueDate"), change("milestone")]);
        assert!(!filter.evaluate(&milestones));
        let assignees = change_activity(2, "ABC", vec![change("assigner"), change("assignee")]);
        assert!(!filter.evaluate(&assignees));
    }

    #[test]
    fn milestone_plus_assignee_is_meaningful() {
        // Neither list covers the whole set, so the pair is not uniform noise.
        let filter = meaningful_change();
        let activity = change_activity(1, "ABC", vec![change("dueDate"), change("assignee")]);
        assert!(filter.evaluate(&activity));
    }

    #[test]
    fn comment_must_have_text_after_trimming() {
        let filter = ActivityFilter::HasComment;
        assert!(filter.evaluate(&comment_activity(1, "ABC", "looks good")));
        assert!(!filter.evaluate(&comment_activity(2, "ABC", "   ")));
        assert!(!filter.evaluate(&change_activity(3, "ABC", vec![change("status")])));
    }

    #[test]
    fn exclusion_is_exact_and_case_sensitive() {
        let filter = exclude(&["DAILY_REPORT"]);
        assert!(!filter.evaluate(&comment_activity(1, "DAILY_REPORT", "x")));
        assert!(filter.evaluate(&comment_activity(2, "daily_report", "x")));
        assert!(filter.evaluate(&comment_activity(3, "DAILY_REPORTS", "x")));
        assert!(filter.evaluate(&comment_activity(4, "ABC", "x")));
    }

    #[test]
    fn empty_and_is_true_empty_or_is_false() {
        let activity = comment_activity(1, "ABC", "x");
        assert!(ActivityFilter::And(vec![]).evaluate(&activity));
        assert!(!ActivityFilter::Or(vec![]).evaluate(&activity));
    }

    #[test]
    fn not_is_complementary() {
        let filter = ActivityFilter::HasComment;
        let negated = ActivityFilter::Not(Box::new(filter.clone()));
        for activity in [
            comment_activity(1, "ABC", "x"),
            change_activity(2, "ABC", vec![change("status")]),
        ] {
            assert_ne!(filter.evaluate(&activity), negated.evaluate(&activity));
        }
    }

    #[test]
    fn default_composition_combines_all_three_rules() {
        let filter = ActivityFilter::default_for(&AppConfig::default());

        // Commented activity in a normal project passes.
        assert!(filter.evaluate(&comment_activity(1, "ABC", "done")));
        // Lone due-date change is dropped.
        assert!(!filter.evaluate(&change_activity(2, "ABC", vec![change("dueDate")])));
        // Meaningful change passes.
        assert!(filter.evaluate(&change_activity(3, "ABC", vec![change("status")])));
        // Excluded project is dropped even with a comment.
        assert!(!filter.evaluate(&comment_activity(4, "DAILY_REPORT", "done")));
    }
}
