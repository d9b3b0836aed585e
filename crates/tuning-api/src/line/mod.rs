//! LINE Messaging API adapters: webhook signatures, webhook payloads, and
//! the reply client.

pub mod client;
pub mod signature;
pub mod webhook;
