//! Inbound chat event types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, platform-issued identifier of an end user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserIdentity(String);

impl UserIdentity {
    /// Wraps a platform user id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle used to answer one inbound event. Never inspected by the core.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplyToken(String);

impl ReplyToken {
    /// Wraps a platform reply token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for the transport.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are short-lived credentials; keep them out of logs.
impl fmt::Debug for ReplyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ReplyToken(..)")
    }
}

/// An already-authenticated text message event.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    /// Who sent the message.
    pub user: UserIdentity,
    /// The raw message text, untrimmed.
    pub text: String,
    /// Passed through to the reply operation.
    pub reply_token: ReplyToken,
}

impl InboundEvent {
    /// Creates a new inbound event.
    #[must_use]
    pub fn new(user: UserIdentity, text: impl Into<String>, reply_token: ReplyToken) -> Self {
        Self {
            user,
            text: text.into(),
            reply_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_token_debug_does_not_leak_value() {
        let token = ReplyToken::new("nHuyWiB7yP5Zw52FIkcQobQuGDXCTA");

        assert_eq!(format!("{token:?}"), "ReplyToken(..)");
        assert_eq!(token.as_str(), "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA");
    }

    #[test]
    fn test_user_identity_serializes_as_bare_string() {
        let user = UserIdentity::new("U4af4980629");

        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json, serde_json::json!("U4af4980629"));
        assert_eq!(user.to_string(), "U4af4980629");
    }
}
