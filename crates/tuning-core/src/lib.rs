//! Tuning Core — shared abstractions.
//!
//! This crate defines the identity and event types handed in by the
//! messaging platform, the reply plan handed back to it, and the two
//! collaborator seams the conversation engine depends on: the entitlement
//! store and the reply sender. It contains no transport code.

pub mod delivery;
pub mod entitlement;
pub mod error;
pub mod event;
