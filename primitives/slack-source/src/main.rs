//! Slack Source - Daily Report Retrieval
//!
//! Scans one Slack channel for messages carrying the daily report keyword,
//! expands their threads, resolves their authors, and writes each report to
//! stdout as a JSON line.
//!
//! Slack failures are logged and produce no output; they do not fail the
//! process. Missing or invalid configuration does.
//!
//! # Usage
//!
//! ```bash
//! # Reports from the last day
//! SLACK_BOT_TOKEN=xoxb-... SLACK_CHANNEL_ID=C12345678 slack-source
//!
//! # Last week, pretty-printed
//! slack-source --days-ago 7 --pretty
//!
//! # Everything since an explicit Slack timestamp
//! slack-source --oldest 1617180600.000000
//! ```

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use slack_common::{
    ChannelHistoryFetcher, DailyReport, RetrievalWindow, Settings, collect_daily_reports,
    logging::init_logging,
};

/// Daily report retrieval from a Slack channel.
#[derive(Parser, Debug)]
#[command(name = "slack-source")]
#[command(about = "Fetches daily reports from a Slack channel")]
struct Args {
    #[command(flatten)]
    settings: Settings,

    /// How many days back to scan.
    #[arg(short, long, default_value = "1")]
    days_ago: u32,

    /// Explicit Slack timestamp to scan from; overrides --days-ago.
    #[arg(short, long)]
    oldest: Option<String>,

    /// Pretty-print JSON output.
    #[arg(short, long, env = "SLACK_SOURCE_PRETTY")]
    pretty: bool,
}

/// Formats a report for output.
fn format_report(report: &DailyReport, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = args.settings;
    settings.validate()?;

    let _guard = init_logging(&settings)?;
    tracing::debug!(?settings, sync_interval = ?settings.sync_interval(), "Loaded settings");

    let fetcher =
        ChannelHistoryFetcher::new(&settings).context("failed to build Slack client")?;
    let window = RetrievalWindow::new(args.days_ago, args.oldest);

    let reports = collect_daily_reports(&fetcher, &window).await;

    let mut stdout = io::stdout().lock();
    for report in &reports {
        writeln!(stdout, "{}", format_report(report, args.pretty)?)?;
    }
    stdout.flush()?;

    Ok(())
}
