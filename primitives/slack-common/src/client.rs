//! Slack Web API client.
//!
//! Covers the three read calls daily report retrieval needs. Every call is a
//! single `GET` with bearer auth; pagination cursors are not followed.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{Error, Message, Result, Settings, UserProfile};

/// Common `{ ok, error, ... }` envelope around every Web API response.
#[derive(Debug, Deserialize)]
struct Envelope {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    #[serde(default)]
    user: UserProfile,
}

/// Bearer-authenticated client for the Slack Web API.
#[derive(Clone)]
pub struct SlackClient {
    http: Client,
    api_base: String,
    token: String,
}

impl SlackClient {
    /// Creates a client against `api_base` with a per-request timeout.
    pub fn new(token: impl Into<String>, api_base: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.slack_bot_token.clone(),
            &settings.slack_api_base,
            settings.request_timeout(),
        )
    }

    /// `conversations.history` from `oldest` up to now.
    pub async fn conversations_history(&self, channel: &str, oldest: &str) -> Result<Vec<Message>> {
        let response: MessagesResponse = self
            .get(
                "conversations.history",
                &[("channel", channel), ("oldest", oldest)],
            )
            .await?;
        Ok(response.messages)
    }

    /// `conversations.replies` for the thread rooted at `ts`, root included.
    pub async fn conversations_replies(&self, channel: &str, ts: &str) -> Result<Vec<Message>> {
        let response: MessagesResponse = self
            .get("conversations.replies", &[("channel", channel), ("ts", ts)])
            .await?;
        Ok(response.messages)
    }

    /// `users.info` for a single user id.
    pub async fn users_info(&self, user: &str) -> Result<UserProfile> {
        let response: UserInfoResponse = self.get("users.info", &[("user", user)]).await?;
        Ok(response.user)
    }

    /// Issues one call and unwraps the response envelope.
    async fn get<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        tracing::debug!(method, "Calling Slack API");

        let body = self
            .http
            .get(format!("{}/{method}", self.api_base))
            .bearer_auth(&self.token)
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let envelope: Envelope =
            serde_json::from_slice(&body).map_err(|source| Error::Decode { method, source })?;

        if !envelope.ok {
            return Err(Error::Api {
                method,
                reason: envelope.error.unwrap_or_else(|| "unknown_error".to_string()),
            });
        }

        serde_json::from_value(Value::Object(envelope.rest))
            .map_err(|source| Error::Decode { method, source })
    }
}
