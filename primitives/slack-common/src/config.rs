//! Configuration sourced from command-line flags and environment variables.
//!
//! [`Settings`] is flattened into each primitive's `clap` parser, so every
//! field can come from a flag or from its environment variable. The value is
//! built once in `main` and handed to whatever needs it.

use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

use clap::Args;

use crate::{Error, Result};

/// Keyword that marks a message as a daily report.
pub const DEFAULT_KEYWORD: &str = "#日報";

/// Slack Web API base URL.
pub const DEFAULT_API_BASE: &str = "https://slack.com/api";

/// Application settings for daily report retrieval.
#[derive(Args, Clone)]
pub struct Settings {
    /// Slack bot token.
    #[arg(long, env = "SLACK_BOT_TOKEN", hide_env_values = true)]
    pub slack_bot_token: String,

    /// Channel to scan for daily reports.
    #[arg(long, env = "SLACK_CHANNEL_ID")]
    pub slack_channel_id: String,

    /// Substring that marks a message as a daily report.
    #[arg(long, env = "SLACK_DAILY_REPORT_KEYWORD", default_value = DEFAULT_KEYWORD)]
    pub slack_daily_report_keyword: String,

    /// Log level (TRACE, DEBUG, INFO, WARNING, ERROR).
    #[arg(long, env = "LOG_LEVEL", default_value = "INFO")]
    pub log_level: LogLevel,

    /// Interval between sync passes, in minutes.
    #[arg(long, env = "SYNC_INTERVAL_MINUTES", default_value = "60")]
    pub sync_interval_minutes: u64,

    /// Optional log file; rotated daily next to the given path.
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Slack Web API base URL.
    #[arg(long, env = "SLACK_API_BASE", default_value = DEFAULT_API_BASE)]
    pub slack_api_base: String,

    /// Request timeout in seconds.
    #[arg(long, env = "SLACK_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout_secs: u64,
}

impl Settings {
    /// Builds settings with defaults for everything but the required values.
    pub fn new(
        bot_token: impl Into<String>,
        channel_id: impl Into<String>,
        keyword: impl Into<String>,
    ) -> Self {
        Self {
            slack_bot_token: bot_token.into(),
            slack_channel_id: channel_id.into(),
            slack_daily_report_keyword: keyword.into(),
            log_level: LogLevel::Info,
            sync_interval_minutes: 60,
            log_file: None,
            slack_api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: 30,
        }
    }

    /// Rejects blank required values.
    pub fn validate(&self) -> Result<()> {
        if self.slack_bot_token.trim().is_empty() {
            return Err(Error::Config("SLACK_BOT_TOKEN must not be empty".to_string()));
        }
        if self.slack_channel_id.trim().is_empty() {
            return Err(Error::Config("SLACK_CHANNEL_ID must not be empty".to_string()));
        }
        if self.slack_daily_report_keyword.is_empty() {
            return Err(Error::Config(
                "SLACK_DAILY_REPORT_KEYWORD must not be empty".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "SLACK_REQUEST_TIMEOUT must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_minutes.saturating_mul(60))
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("slack_bot_token", &"<redacted>")
            .field("slack_channel_id", &self.slack_channel_id)
            .field("slack_daily_report_keyword", &self.slack_daily_report_keyword)
            .field("log_level", &self.log_level)
            .field("sync_interval_minutes", &self.sync_interval_minutes)
            .field("log_file", &self.log_file)
            .field("slack_api_base", &self.slack_api_base)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Log verbosity, accepting the usual upper-case level names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARNING",
            LogLevel::Error => "ERROR",
        })
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" | "critical" => Ok(LogLevel::Error),
            other => Err(Error::Config(format!("unknown log level: {other}"))),
        }
    }
}
