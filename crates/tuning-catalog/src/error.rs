//! Catalog load errors. All of them are fatal at startup.

use std::path::PathBuf;

use thiserror::Error;

/// The catalog could not be turned into a servable set of episodes.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The data is not a keyed mapping or a list of records.
    #[error("catalog is not a supported shape: {0}")]
    Parse(String),

    /// The file extension does not name a supported format.
    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    /// Normalization left no episodes.
    #[error("catalog contains no episodes")]
    Empty,
}
