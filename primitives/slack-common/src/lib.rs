//! Slack Common - Daily Report Retrieval
//!
//! Shared library behind the `slack-source` primitive. Reads a single Slack
//! channel, picks out messages carrying the daily-report keyword, expands
//! their threads, and resolves the people who wrote them.
//!
//! # Layout
//!
//! - [`config`] - settings sourced from flags and environment variables
//! - [`logging`] - tracing subscriber setup (stdout plus optional file)
//! - [`client`] - thin Slack Web API client
//! - [`fetcher`] - [`ChannelHistoryFetcher`], the keyword/thread/user retrieval
//! - [`report`] - assembles fetched messages into [`DailyReport`] records

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod report;

pub use client::SlackClient;
pub use config::{LogLevel, Settings};
pub use error::{Error, Result};
pub use fetcher::ChannelHistoryFetcher;
pub use models::{Message, RetrievalWindow, UserProfile};
pub use report::{DailyReport, Reply, collect_daily_reports};
