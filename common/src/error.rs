use thiserror::Error;

/// Failures at the activity-source boundary.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("activity api returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("missing configuration: {0} is not set")]
    MissingConfig(String),
}

/// Failures surfaced by the report pipeline. Filtering and report generation
/// are pure and cannot fail; only the fetch and the caller's date input can.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to fetch activities for user {user_id} on {date}")]
    SourceUnavailable {
        user_id: u64,
        date: String,
        #[source]
        source: SourceError,
    },

    #[error("invalid report date {0:?}, expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate(String),
}

/// Failures while loading process configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("DAILY_REPORT_MEMBERS is not valid JSON: {0}")]
    InvalidMembers(#[from] serde_json::Error),
}
