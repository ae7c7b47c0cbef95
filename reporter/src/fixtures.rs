//! Shared activity builders for the unit tests.

use daily_report_common::models::{Activity, Change, Comment, Content, Project, User};

/// Day every fixture activity is created on unless overridden.
pub const REPORT_DAY: &str = "2026-08-07";

pub fn project(key: &str) -> Project {
    Project {
        id: 1,
        project_key: key.to_string(),
        name: format!("{} project", key),
    }
}

pub fn user() -> User {
    User {
        id: 9,
        user_id: "hideo".to_string(),
        name: "Hideo".to_string(),
        mail_address: None,
    }
}

pub fn change(field: &str) -> Change {
    Change {
        field: field.to_string(),
        field_text: None,
        old_value: Some("before".to_string()),
        new_value: Some("after".to_string()),
        change_type: "standard".to_string(),
    }
}

pub fn labeled_change(field: &str, label: &str) -> Change {
    Change {
        field_text: Some(label.to_string()),
        ..change(field)
    }
}

fn base_activity(id: u64, key: &str, content: Content) -> Activity {
    Activity {
        id,
        project: project(key),
        type_id: 3,
        content,
        created_user: user(),
        created: format!("{}T09:{:02}:00Z", REPORT_DAY, id % 60),
    }
}

pub fn comment_activity(id: u64, key: &str, text: &str) -> Activity {
    base_activity(
        id,
        key,
        Content {
            id: id * 100,
            key_id: id,
            summary: format!("Issue {}", id),
            comment: Some(Comment {
                id: id * 1000,
                content: text.to_string(),
            }),
            ..Content::default()
        },
    )
}

pub fn change_activity(id: u64, key: &str, changes: Vec<Change>) -> Activity {
    base_activity(
        id,
        key,
        Content {
            id: id * 100,
            key_id: id,
            summary: format!("Issue {}", id),
            changes: Some(changes),
            ..Content::default()
        },
    )
}
