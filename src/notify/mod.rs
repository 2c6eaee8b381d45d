//! Forwarding of findings to chat channels.
//!
//! Delivery is best effort: failures are logged and never change the status
//! of the run.

use std::collections::HashMap;

use async_trait::async_trait;
use bollard::models::ContainerInspectResponse;

pub mod slack;

/// Label a container can carry to route its notifications elsewhere.
pub const DEFAULT_CONTACT_LABEL: &str = "SLACK_CONTACT";

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Channel {channel} rejected the message: {reason}")]
    Rejected { channel: String, reason: String },
}

#[async_trait]
pub trait ChatSink: Send + Sync {
    async fn post(&self, channel: &str, text: &str) -> Result<(), NotifyError>;
}

/// Splits a comma separated channel list such as `"#ops, #infra"`.
pub fn parse_channels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|channel| {
            channel
                .trim_start_matches(|c: char| c == '#' || c.is_whitespace())
                .trim_end()
        })
        .filter(|channel| !channel.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct Notifier {
    sink: Box<dyn ChatSink>,
    default_channels: Vec<String>,
    contact_label: String,
}

impl Notifier {
    pub fn new(
        sink: Box<dyn ChatSink>,
        default_channels: Vec<String>,
        contact_label: String,
    ) -> Self {
        Self {
            sink,
            default_channels,
            contact_label,
        }
    }

    /// Channels for a container: its contact label when it names at least one
    /// channel, the default list otherwise.
    pub fn destinations(&self, labels: Option<&HashMap<String, String>>) -> Vec<String> {
        labels
            .and_then(|labels| labels.get(&self.contact_label))
            .map(|raw| parse_channels(raw))
            .filter(|channels| !channels.is_empty())
            .unwrap_or_else(|| self.default_channels.clone())
    }

    /// Sends `message` to every destination of `container` and returns how
    /// many deliveries succeeded.
    pub async fn notify(&self, container: &ContainerInspectResponse, message: &str) -> usize {
        let labels = container
            .config
            .as_ref()
            .and_then(|config| config.labels.as_ref());

        let mut delivered = 0;
        for channel in self.destinations(labels) {
            match self.sink.post(&channel, message).await {
                Ok(()) => {
                    log::debug!("Notified #{channel}");
                    delivered += 1;
                }
                Err(e) => log::warn!("Failed to notify #{channel}: {e}"),
            }
        }
        delivered
    }
}
