//! Catalog file loading.

pub mod loader;
