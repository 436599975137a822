//! Slack data model.
//!
//! Messages and user records are kept as the JSON objects Slack sent, so
//! they pass through unchanged (explicit nulls and missing keys included).
//! Accessors read the few fields the retrieval logic needs.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn str_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

/// A single channel or thread message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(Map<String, Value>);

impl Message {
    /// Service timestamp, `seconds.micros`. Doubles as the message id.
    pub fn ts(&self) -> &str {
        str_field(&self.0, "ts").unwrap_or_default()
    }

    /// Author id.
    pub fn user(&self) -> Option<&str> {
        str_field(&self.0, "user")
    }

    pub fn text(&self) -> Option<&str> {
        str_field(&self.0, "text")
    }

    /// Root timestamp when the message belongs to a thread.
    pub fn thread_ts(&self) -> Option<&str> {
        str_field(&self.0, "thread_ts")
    }

    pub fn reply_count(&self) -> Option<u64> {
        self.0.get("reply_count").and_then(Value::as_u64)
    }

    /// Whether the text contains `keyword` as a literal, case-sensitive substring.
    pub fn contains_keyword(&self, keyword: &str) -> bool {
        self.text().is_some_and(|text| text.contains(keyword))
    }

    /// Whether the message has thread replies worth fetching.
    pub fn has_replies(&self) -> bool {
        self.reply_count().is_some_and(|count| count > 0)
    }

    /// Wall-clock time the message was posted.
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        ts_to_datetime(self.ts())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Message {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A user record as returned by `users.info`.
///
/// The default value is the empty record handed back when a lookup fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(Map<String, Value>);

impl UserProfile {
    pub fn id(&self) -> Option<&str> {
        str_field(&self.0, "id")
    }

    /// Handle.
    pub fn name(&self) -> Option<&str> {
        str_field(&self.0, "name")
    }

    pub fn real_name(&self) -> Option<&str> {
        str_field(&self.0, "real_name")
    }

    /// Field under the nested `profile` object.
    pub fn profile_field(&self, key: &str) -> Option<&str> {
        self.0
            .get("profile")
            .and_then(Value::as_object)
            .and_then(|profile| str_field(profile, key))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Best human-readable name: display name, then real name, then handle.
    pub fn display_name(&self) -> Option<&str> {
        [
            self.profile_field("display_name"),
            self.profile_field("real_name"),
            self.real_name(),
            self.name(),
        ]
        .into_iter()
        .flatten()
        .find(|name| !name.trim().is_empty())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for UserProfile {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Lower bound of a history fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalWindow {
    pub days_ago: u32,
    /// Explicit lower bound; wins over `days_ago` when present.
    pub oldest: Option<String>,
}

impl RetrievalWindow {
    pub fn new(days_ago: u32, oldest: Option<String>) -> Self {
        Self { days_ago, oldest }
    }

    /// Resolves the bound against the current time.
    pub fn resolve(&self) -> String {
        self.resolve_at(Utc::now())
    }

    /// Resolves the bound against `now`: the explicit value verbatim, or
    /// `now - days_ago` as whole epoch seconds. Windows reaching past the
    /// representable range start at the epoch.
    pub fn resolve_at(&self, now: DateTime<Utc>) -> String {
        match &self.oldest {
            Some(oldest) => oldest.clone(),
            None => TimeDelta::try_days(i64::from(self.days_ago))
                .and_then(|days| now.checked_sub_signed(days))
                .map_or(0, |oldest| oldest.timestamp().max(0))
                .to_string(),
        }
    }
}

impl Default for RetrievalWindow {
    fn default() -> Self {
        Self::new(1, None)
    }
}

/// Parses a `seconds.micros` service timestamp.
pub fn ts_to_datetime(ts: &str) -> Option<DateTime<Utc>> {
    let (secs, frac) = ts.split_once('.').unwrap_or((ts, ""));
    let secs = secs.parse::<i64>().ok()?;
    let micros = if frac.is_empty() {
        0
    } else {
        // Right-pad to six digits so "1.5" reads as half a second.
        let digits: String = frac.chars().chain(std::iter::repeat('0')).take(6).collect();
        digits.parse::<u32>().ok()?
    };
    Utc.timestamp_opt(secs, micros * 1_000).single()
}
