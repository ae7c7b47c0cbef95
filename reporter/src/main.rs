use anyhow::{bail, Context, Result};
use clap::Parser;
use daily_report_common::config::AppConfig;
use daily_report_common::source::BacklogClient;
use dotenv::dotenv;
use tracing::info;

mod filters;
mod generators;
mod service;

#[cfg(test)]
mod fixtures;

use generators::{ReportConfig, ReportFormat, TimeStyle};
use service::{ActivityService, ServiceConfig};

/// Generates a daily activity report from the project-tracking service.
#[derive(Parser, Debug)]
#[command(name = "daily-report")]
struct Args {
    /// User to report on; defaults to every configured member.
    #[arg(long)]
    user_id: Option<u64>,

    /// Report day (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    date: Option<String>,

    /// Output format: text, markdown or html.
    #[arg(long, default_value = "markdown")]
    format: String,

    /// Render full timestamps instead of HH:MM times.
    #[arg(long)]
    full_times: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let report_config = report_config_from_args(&args)?;

    let app_config = AppConfig::from_env().context("loading configuration")?;
    let client = BacklogClient::from_env().context("building the tracking service client")?;

    let service = ActivityService::with_config(
        client,
        &app_config,
        ServiceConfig {
            report_config: Some(report_config),
            ..ServiceConfig::default()
        },
    );

    let targets: Vec<(u64, String)> = match args.user_id {
        Some(id) => vec![(id, format!("user {}", id))],
        None => app_config
            .daily_report
            .members
            .iter()
            .map(|member| (member.id, member.name.clone()))
            .collect(),
    };
    if targets.is_empty() {
        bail!("no --user-id given and no members configured in DAILY_REPORT_MEMBERS");
    }

    println!("🔌 Fetching activities from the tracking service...");
    for (user_id, label) in targets {
        let result = service
            .get_meaningful_activities(user_id, args.date.as_deref())
            .await?;

        info!(
            "{}: {} meaningful activities on {}",
            label,
            result.activities.len(),
            result.date
        );
        println!("\n===== {} ({}) =====\n{}", label, result.date, result.report);
    }

    Ok(())
}

fn report_config_from_args(args: &Args) -> Result<ReportConfig> {
    let format = match args.format.as_str() {
        "text" => ReportFormat::Text,
        "markdown" => ReportFormat::Markdown,
        "html" => ReportFormat::Html,
        other => bail!("unsupported format '{}', expected text, markdown or html", other),
    };
    let time_style = if args.full_times {
        TimeStyle::DateTime
    } else {
        TimeStyle::HourMinute
    };

    Ok(ReportConfig { format, time_style })
}
