//! Per-event orchestration.

pub mod dispatcher;
