//! Reply API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{instrument, warn};
use tuning_catalog::Catalog;
use tuning_core::delivery::{ReplyPlan, ReplySender};
use tuning_core::error::DeliveryError;
use tuning_core::event::ReplyToken;

/// Most messages a single reply may carry.
pub const MAX_REPLY_MESSAGES: usize = 5;

/// Production reply API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.line.me";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: Vec<TextMessage<'a>>,
}

#[derive(Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

/// Sends reply plans through the LINE reply API.
#[derive(Clone)]
pub struct LineReplyClient {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl LineReplyClient {
    /// Creates a client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::Transport` if the HTTP client cannot be
    /// constructed.
    pub fn new(
        base_url: &str,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: format!("{}/v2/bot/message/reply", base_url.trim_end_matches('/')),
            access_token: access_token.into(),
        })
    }
}

impl std::fmt::Debug for LineReplyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineReplyClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ReplySender for LineReplyClient {
    #[instrument(skip_all, fields(messages = plan.len()))]
    async fn send(&self, token: &ReplyToken, plan: &ReplyPlan) -> Result<(), DeliveryError> {
        if plan.len() > MAX_REPLY_MESSAGES {
            return Err(DeliveryError::TooManyMessages {
                count: plan.len(),
                limit: MAX_REPLY_MESSAGES,
            });
        }

        let request = ReplyRequest {
            reply_token: token.as_str(),
            messages: plan
                .messages()
                .iter()
                .map(|text| TextMessage {
                    kind: "text",
                    text: text.as_str(),
                })
                .collect(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Episodes too long to fit in one reply, logging each at `warn`.
pub fn oversized_episodes(catalog: &Catalog) -> Vec<u32> {
    catalog
        .iter()
        .filter(|episode| episode.message_count() > MAX_REPLY_MESSAGES)
        .inspect(|episode| {
            warn!(
                episode = episode.number,
                messages = episode.message_count(),
                limit = MAX_REPLY_MESSAGES,
                "episode exceeds the reply message limit and cannot be delivered"
            );
        })
        .map(|episode| episode.number)
        .collect()
}

#[cfg(test)]
mod tests {
    use tuning_catalog::Episode;

    use super::*;

    #[test]
    fn test_oversized_episodes_counts_subtitle() {
        let five_lines: Vec<String> = (1..=5).map(|n| n.to_string()).collect();
        let catalog = Catalog::from_episodes(vec![
            Episode::new(1, "", five_lines.clone()),
            Episode::new(2, "subtitle", five_lines),
            Episode::new(3, "subtitle", vec!["a".to_owned()]),
        ])
        .unwrap();

        assert_eq!(oversized_episodes(&catalog), vec![2]);
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = LineReplyClient::new("http://localhost:8080/", "token", Duration::from_secs(1))
            .unwrap();

        assert_eq!(client.endpoint, "http://localhost:8080/v2/bot/message/reply");
    }
}
