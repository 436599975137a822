//! Daily report assembly.
//!
//! Turns keyword-matched messages into self-contained records: the report
//! text, who wrote it, when, and the replies in its thread.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::{ChannelHistoryFetcher, Message, RetrievalWindow};

/// One daily report with its thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReport {
    pub ts: String,
    pub channel_id: String,
    pub author_id: Option<String>,
    pub author_name: Option<String>,
    pub text: String,
    pub posted_at: Option<DateTime<Utc>>,
    pub replies: Vec<Reply>,
}

/// A reply in a daily report's thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub ts: String,
    pub author_id: Option<String>,
    pub author_name: Option<String>,
    pub text: String,
}

/// Resolves user ids to names, asking Slack at most once per id.
///
/// Lives for a single pass; nothing is remembered between passes.
struct AuthorDirectory<'a> {
    fetcher: &'a ChannelHistoryFetcher,
    names: HashMap<String, String>,
}

impl<'a> AuthorDirectory<'a> {
    fn new(fetcher: &'a ChannelHistoryFetcher) -> Self {
        Self {
            fetcher,
            names: HashMap::new(),
        }
    }

    /// Display name for `user_id`, or the id itself when the lookup fails.
    async fn name_of(&mut self, user_id: Option<&str>) -> Option<String> {
        let user_id = user_id?;
        if let Some(name) = self.names.get(user_id) {
            return Some(name.clone());
        }

        let profile = self.fetcher.fetch_user_profile(user_id).await;
        let name = profile
            .display_name()
            .map(str::to_string)
            .unwrap_or_else(|| user_id.to_string());
        self.names.insert(user_id.to_string(), name.clone());
        Some(name)
    }
}

/// Fetches daily reports in `window` and expands each into a [`DailyReport`].
///
/// Failures along the way are logged by the fetcher and degrade to missing
/// data (no reports, no replies, raw user ids) rather than aborting the pass.
pub async fn collect_daily_reports(
    fetcher: &ChannelHistoryFetcher,
    window: &RetrievalWindow,
) -> Vec<DailyReport> {
    let messages = fetcher
        .fetch_daily_reports(window.days_ago, window.oldest.as_deref())
        .await;

    let mut authors = AuthorDirectory::new(fetcher);
    let mut reports = Vec::with_capacity(messages.len());

    for message in messages {
        let replies = if message.has_replies() {
            fetcher.fetch_thread_replies(message.ts()).await
        } else {
            Vec::new()
        };

        let mut thread = Vec::with_capacity(replies.len());
        for reply in replies {
            let author_name = authors.name_of(reply.user()).await;
            thread.push(Reply {
                author_name,
                ..Reply::from(&reply)
            });
        }

        let author_name = authors.name_of(message.user()).await;
        reports.push(DailyReport {
            posted_at: message.posted_at(),
            channel_id: fetcher.channel_id().to_string(),
            author_name,
            author_id: message.user().map(str::to_string),
            text: message.text().unwrap_or_default().to_string(),
            ts: message.ts().to_string(),
            replies: thread,
        });
    }

    info!(
        reports = reports.len(),
        authors = authors.names.len(),
        "Assembled daily reports"
    );
    reports
}

impl From<&Message> for Reply {
    fn from(message: &Message) -> Self {
        Self {
            ts: message.ts().to_string(),
            author_id: message.user().map(str::to_string),
            author_name: None,
            text: message.text().unwrap_or_default().to_string(),
        }
    }
}
