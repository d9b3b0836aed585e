//! Webhook payload types.
//!
//! Only the fields needed to recognise a text message from a user are
//! modelled; everything else in the payload is ignored.

use serde::Deserialize;
use tuning_core::event::{InboundEvent, ReplyToken, UserIdentity};

/// One webhook delivery.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    /// Bot user id the delivery is addressed to.
    #[serde(default)]
    pub destination: Option<String>,
    /// Events in this delivery; empty for the console's verify request.
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// One event of a delivery.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    /// Event type, e.g. `message`, `follow`, `postback`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Present on events that can be replied to.
    #[serde(default)]
    pub reply_token: Option<String>,
    /// Who triggered the event.
    #[serde(default)]
    pub source: Option<EventSource>,
    /// Present on `message` events.
    #[serde(default)]
    pub message: Option<EventMessage>,
}

/// Event origin.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    /// `user`, `group` or `room`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Sender's user id, when the platform discloses it.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Message body of a `message` event.
#[derive(Debug, Deserialize)]
pub struct EventMessage {
    /// `text`, `sticker`, `image`, ...
    #[serde(rename = "type")]
    pub kind: String,
    /// Present on text messages.
    #[serde(default)]
    pub text: Option<String>,
}

impl WebhookEvent {
    /// Converts a replyable text message from an identified user into an
    /// [`InboundEvent`]; any other event yields `None`.
    #[must_use]
    pub fn into_inbound(self) -> Option<InboundEvent> {
        if self.kind != "message" {
            return None;
        }
        let message = self.message.filter(|m| m.kind == "text")?;
        let text = message.text?;
        let user_id = self.source?.user_id?;
        let reply_token = self.reply_token?;
        Some(InboundEvent::new(
            UserIdentity::new(user_id),
            text,
            ReplyToken::new(reply_token),
        ))
    }
}
