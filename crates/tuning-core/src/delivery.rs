//! Reply plans and the outbound reply seam.

use async_trait::async_trait;

use crate::error::DeliveryError;
use crate::event::ReplyToken;

/// Ordered, non-empty list of text messages answering one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyPlan {
    messages: Vec<String>,
}

impl ReplyPlan {
    /// A plan carrying exactly one message.
    #[must_use]
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// Builds a plan from `messages`, or `None` if there are none.
    #[must_use]
    pub fn from_messages(messages: Vec<String>) -> Option<Self> {
        if messages.is_empty() {
            None
        } else {
            Some(Self { messages })
        }
    }

    /// The messages in send order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Number of messages; always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Consumes the plan, returning its messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

/// Transport collaborator that delivers a whole plan in one reply call.
#[async_trait]
pub trait ReplySender: Send + Sync {
    /// Sends every message of `plan` as a single reply to `token`.
    async fn send(&self, token: &ReplyToken, plan: &ReplyPlan) -> Result<(), DeliveryError>;
}
