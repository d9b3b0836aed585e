//! HTTP entitlement store.
//!
//! Talks to a small web backend (historically a spreadsheet script) that
//! answers "is this user premium?" and records newly unlocked users.

pub mod http_entitlement_store;
pub mod response;

pub use http_entitlement_store::{HttpEntitlementConfig, HttpEntitlementStore};
