//! Normalized episode and catalog types.

use std::collections::BTreeMap;

use crate::error::CatalogError;

/// One numbered unit of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    /// Episode number, starting at 1.
    pub number: u32,
    /// Subtitle shown before the lines; empty when the source has none.
    pub subtitle: String,
    /// Message lines in display order. Never contains empty strings.
    pub lines: Vec<String>,
}

impl Episode {
    /// Creates an episode.
    #[must_use]
    pub fn new(number: u32, subtitle: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            number,
            subtitle: subtitle.into(),
            lines,
        }
    }

    /// Returns `true` if there is neither a subtitle nor any line.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.subtitle.is_empty() && self.lines.is_empty()
    }

    /// Number of messages this episode renders to when released.
    #[must_use]
    pub fn message_count(&self) -> usize {
        if self.is_blank() {
            return 1;
        }
        usize::from(!self.subtitle.is_empty()) + self.lines.len()
    }
}

/// Immutable mapping from episode number to episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    episodes: BTreeMap<u32, Episode>,
}

impl Catalog {
    /// Builds a catalog. Later episodes replace earlier ones with the same
    /// number.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` if `episodes` yields nothing.
    pub fn from_episodes(episodes: impl IntoIterator<Item = Episode>) -> Result<Self, CatalogError> {
        let episodes: BTreeMap<u32, Episode> =
            episodes.into_iter().map(|e| (e.number, e)).collect();
        if episodes.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { episodes })
    }

    /// Looks up an episode by number.
    #[must_use]
    pub fn get(&self, number: u32) -> Option<&Episode> {
        self.episodes.get(&number)
    }

    /// Returns `true` if `number` resolves to an episode.
    #[must_use]
    pub fn contains(&self, number: u32) -> bool {
        self.episodes.contains_key(&number)
    }

    /// Number of episodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    /// Always `false` for a constructed catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Highest episode number in the catalog.
    #[must_use]
    pub fn max_number(&self) -> u32 {
        self.episodes.keys().next_back().copied().unwrap_or(0)
    }

    /// Episode numbers in ascending order.
    pub fn numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.episodes.keys().copied()
    }

    /// Episodes in ascending number order.
    pub fn iter(&self) -> impl Iterator<Item = &Episode> {
        self.episodes.values()
    }
}
