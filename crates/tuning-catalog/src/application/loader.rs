//! Reads a catalog file and normalizes it.

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::info;

use crate::domain::episode::Catalog;
use crate::domain::source::RawCatalog;
use crate::error::CatalogError;

/// Serialization format of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl CatalogFormat {
    /// Picks the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A normalized catalog together with a fingerprint of its source bytes.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    /// The normalized catalog.
    pub catalog: Catalog,
    /// Lowercase hex SHA-256 of the source file.
    pub version: String,
}

/// Parses and normalizes catalog `bytes`.
///
/// # Errors
///
/// Returns `CatalogError::Parse` if the bytes are not one of the supported
/// shapes, or `CatalogError::Empty` if normalization leaves no episodes.
pub fn parse_catalog(bytes: &[u8], format: CatalogFormat) -> Result<Catalog, CatalogError> {
    let raw: RawCatalog = match format {
        CatalogFormat::Json => {
            serde_json::from_slice(bytes).map_err(|e| CatalogError::Parse(e.to_string()))?
        }
        CatalogFormat::Yaml => {
            serde_yaml::from_slice(bytes).map_err(|e| CatalogError::Parse(e.to_string()))?
        }
    };
    raw.normalize()
}

/// Loads the catalog at `path`, choosing the format by extension.
///
/// # Errors
///
/// Returns `CatalogError` if the file cannot be read, parsed, or yields no
/// episodes.
pub fn load_catalog(path: &Path) -> Result<LoadedCatalog, CatalogError> {
    let format = CatalogFormat::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&bytes, format)?;
    let version = format!("{:x}", Sha256::digest(&bytes));

    info!(
        path = %path.display(),
        episodes = ?catalog.numbers().collect::<Vec<_>>(),
        version = %version,
        "catalog loaded"
    );

    Ok(LoadedCatalog { catalog, version })
}
