//! Slack delivery through the Web API `chat.postMessage` method.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ChatSink, NotifyError};

pub const DEFAULT_API_URL: &str = "https://slack.com/api";

pub struct SlackClient {
    client: Client,
    token: String,
    api_url: String,
}

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
}

/// Slack answers 200 even for failures, the outcome is in `ok`.
#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

impl SlackClient {
    pub fn new(token: String, api_url: String) -> Self {
        Self {
            client: Client::new(),
            token,
            api_url,
        }
    }

    fn post_message_url(&self) -> String {
        format!("{}/chat.postMessage", self.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatSink for SlackClient {
    async fn post(&self, channel: &str, text: &str) -> Result<(), NotifyError> {
        let response: PostMessageResponse = self
            .client
            .post(self.post_message_url())
            .bearer_auth(&self.token)
            .json(&PostMessageRequest { channel, text })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.ok {
            return Ok(());
        }
        Err(NotifyError::Rejected {
            channel: channel.to_string(),
            reason: response.error.unwrap_or_else(|| "unknown error".to_string()),
        })
    }
}
