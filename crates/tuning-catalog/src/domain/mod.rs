//! Catalog domain types and source normalization.

pub mod episode;
pub mod source;
