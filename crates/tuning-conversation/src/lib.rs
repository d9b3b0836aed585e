//! Tuning — conversation engine.
//!
//! Turns one inbound text message into a reply plan: classify the text,
//! consult the access policy (and the entitlement store when the episode
//! is premium), then compose the ordered reply messages.

pub mod application;
pub mod domain;
