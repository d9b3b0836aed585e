//! Shared test mocks and utilities for the Tuning episode bot.

mod catalog;
mod delivery;
mod entitlement;

pub use catalog::sample_catalog;
pub use delivery::{FailingReplySender, RecordingReplySender};
pub use entitlement::{FailingEntitlementStore, RecordingEntitlementStore};
