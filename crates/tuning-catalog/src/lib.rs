//! Tuning — episode catalog.
//!
//! Responsible for turning an episode source file, in any of the supported
//! record shapes, into the immutable [`Catalog`] the conversation engine
//! reads from.

pub mod application;
pub mod domain;
pub mod error;

pub use application::loader::{CatalogFormat, LoadedCatalog, load_catalog, parse_catalog};
pub use domain::episode::{Catalog, Episode};
pub use error::CatalogError;
