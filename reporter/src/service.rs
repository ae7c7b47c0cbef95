use chrono::{DateTime, NaiveDate, Utc};
use daily_report_common::config::AppConfig;
use daily_report_common::error::ReportError;
use daily_report_common::models::{group_by_project, ActivityResult};
use daily_report_common::source::{ActivitySource, FetchOptions};
use tracing::{info, warn};

use crate::filters::ActivityFilter;
use crate::generators::{ReportConfig, ReportGenerator, TemplateReportGenerator};

/// Upper bound requested from the source per run. The source's own paging
/// limits apply beyond this; the pipeline does not paginate further.
const ACTIVITY_FETCH_COUNT: u32 = 100;

/// Optional strategy overrides for [`ActivityService::with_config`]. Anything
/// left `None` falls back to the documented default.
#[derive(Default)]
pub struct ServiceConfig {
    pub filter: Option<ActivityFilter>,
    pub report_config: Option<ReportConfig>,
    pub report_generator: Option<Box<dyn ReportGenerator>>,
}

/// The coordinating pipeline: fetch, narrow to one day, filter, group by
/// project, render. Keeps no state between runs; the filter and generator
/// are replaceable between calls.
pub struct ActivityService<S: ActivitySource> {
    source: S,
    filter: ActivityFilter,
    report_generator: Box<dyn ReportGenerator>,
}

impl<S: ActivitySource> ActivityService<S> {
    pub fn new(source: S, app_config: &AppConfig) -> Self {
        Self::with_config(source, app_config, ServiceConfig::default())
    }

    pub fn with_config(source: S, app_config: &AppConfig, config: ServiceConfig) -> Self {
        let ServiceConfig {
            filter,
            report_config,
            report_generator,
        } = config;

        let filter = filter.unwrap_or_else(|| ActivityFilter::default_for(app_config));
        // A caller-supplied generator wins; report_config only shapes the
        // default template generator.
        let report_generator = report_generator.unwrap_or_else(|| {
            Box::new(TemplateReportGenerator::new(report_config.unwrap_or_default()))
        });

        Self {
            source,
            filter,
            report_generator,
        }
    }

    pub fn set_filter(&mut self, filter: ActivityFilter) {
        self.filter = filter;
    }

    pub fn set_report_generator(&mut self, generator: Box<dyn ReportGenerator>) {
        self.report_generator = generator;
    }

    /// Forwards new settings to the active generator. A generator that does
    /// not support reconfiguration keeps its current settings; the attempt
    /// is logged and the run continues.
    pub fn configure_report(&mut self, config: ReportConfig) {
        if !self.report_generator.configure(config) {
            warn!("active report generator does not support reconfiguration; settings unchanged");
        }
    }

    /// Fetches, filters, groups and renders one user's activities for a
    /// calendar day.
    ///
    /// `date` accepts `YYYY-MM-DD` or a full RFC 3339 timestamp and defaults
    /// to the current UTC day. Activities are matched by the literal day
    /// component of their `created` timestamp, so the source is assumed to
    /// report days in the same timezone this process runs in (UTC).
    pub async fn get_meaningful_activities(
        &self,
        user_id: u64,
        date: Option<&str>,
    ) -> Result<ActivityResult, ReportError> {
        let date = normalize_date(date)?;

        let activities = self
            .source
            .fetch_user_activities(
                user_id,
                FetchOptions {
                    count: ACTIVITY_FETCH_COUNT,
                },
            )
            .await
            .map_err(|source| ReportError::SourceUnavailable {
                user_id,
                date: date.clone(),
                source,
            })?;
        let fetched = activities.len();

        let meaningful: Vec<_> = activities
            .into_iter()
            .filter(|activity| activity.created_day() == date)
            .filter(|activity| self.filter.evaluate(activity))
            .collect();

        info!(
            "kept {} of {} fetched activities for user {} on {}",
            meaningful.len(),
            fetched,
            user_id,
            date
        );

        let grouped_by_project = group_by_project(&meaningful);
        let report = self.report_generator.generate(&meaningful);

        Ok(ActivityResult {
            date,
            activities: meaningful,
            grouped_by_project,
            report,
        })
    }
}

fn normalize_date(date: Option<&str>) -> Result<String, ReportError> {
    let day = match date {
        None => Utc::now().date_naive(),
        Some(raw) => {
            parse_day(raw).ok_or_else(|| ReportError::InvalidDate(raw.to_string()))?
        }
    };
    Ok(day.format("%Y-%m-%d").to_string())
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|ts| ts.date_naive())
        })
}
