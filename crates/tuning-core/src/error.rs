//! Collaborator error types.
//!
//! Neither of these ever reaches the end user: entitlement failures are
//! converted to the free tier by [`EntitlementClient`], delivery failures
//! are logged by the dispatcher.
//!
//! [`EntitlementClient`]: crate::entitlement::EntitlementClient

use std::time::Duration;

use thiserror::Error;

/// The entitlement store could not give a usable answer.
#[derive(Debug, Error)]
pub enum EntitlementError {
    /// Connection-level failure talking to the store.
    #[error("entitlement store unreachable: {0}")]
    Transport(String),

    /// The store did not answer within the configured bound.
    #[error("entitlement store timed out after {0:?}")]
    Timeout(Duration),

    /// The store answered with a non-success status.
    #[error("entitlement store returned status {0}")]
    Status(u16),

    /// The response body was not one of the accepted shapes.
    #[error("malformed entitlement response: {0}")]
    MalformedResponse(String),
}

/// The outbound reply operation failed.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Connection-level failure talking to the platform.
    #[error("reply transport failure: {0}")]
    Transport(String),

    /// The platform refused the reply.
    #[error("reply rejected with status {status}: {body}")]
    Rejected {
        /// HTTP status returned by the platform.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The plan has more messages than one reply may carry.
    #[error("reply plan has {count} messages, platform limit is {limit}")]
    TooManyMessages {
        /// Messages in the plan.
        count: usize,
        /// Platform limit.
        limit: usize,
    },
}
