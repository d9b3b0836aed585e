//! Raw catalog source shapes and their normalization.
//!
//! Two source layouts are in circulation:
//!
//! - a mapping keyed by stringified episode number, each value either a bare
//!   array of lines or a record object;
//! - a list of record objects, each carrying its own `episode` field.
//!
//! Records name their subtitle and body with one of several field names.
//! Preference order is fixed: `subtitle` before `title`, and `texts` before
//! `messages` before `lines`. The first present, non-null field wins.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::warn;

use super::episode::{Catalog, Episode};
use crate::error::CatalogError;

/// A catalog as it appears on disk, before normalization.
///
/// Only the outer layout is decoded here. Entries stay untyped until
/// [`normalize`](Self::normalize), where a malformed one is skipped on its
/// own. [`Value`] holds JSON input too and keeps integer mapping keys.
#[derive(Debug, Deserialize)]
#[serde(
    untagged,
    expecting = "a mapping keyed by episode number or a list of episode records"
)]
pub enum RawCatalog {
    /// `{"1": [...], "2": {...}}`
    Keyed(Mapping),
    /// `[{"episode": 1, ...}, ...]`
    Records(Vec<Value>),
}

/// The value side of the keyed shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    /// A bare array of lines.
    Lines(Vec<Option<String>>),
    /// A record object; its own `episode` field, if any, is ignored.
    Record(RawRecord),
}

/// A record object in either shape.
#[derive(Debug, Default, Deserialize)]
pub struct RawRecord {
    /// Episode number, required in the list shape.
    #[serde(default)]
    pub episode: Option<Value>,
    /// Preferred subtitle field.
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Fallback subtitle field.
    #[serde(default)]
    pub title: Option<String>,
    /// Preferred body field.
    #[serde(default)]
    pub texts: Option<Vec<Option<String>>>,
    /// Second body field.
    #[serde(default)]
    pub messages: Option<Vec<Option<String>>>,
    /// Third body field.
    #[serde(default)]
    pub lines: Option<Vec<Option<String>>>,
}

impl RawRecord {
    fn into_episode(self, number: u32) -> Episode {
        let subtitle = self.subtitle.or(self.title).unwrap_or_default();
        let body = self
            .texts
            .or(self.messages)
            .or(self.lines)
            .unwrap_or_default();
        Episode::new(number, subtitle.trim(), clean_lines(body))
    }
}

/// The positive episode number denoted by `value`: a non-negative integer
/// or numeric text. Anything else resolves to `None`.
#[must_use]
pub fn resolve_number(value: &Value) -> Option<u32> {
    let number = match value {
        Value::Number(n) => u32::try_from(n.as_u64()?).ok()?,
        Value::String(s) => s.trim().parse::<u32>().ok()?,
        _ => return None,
    };
    (number > 0).then_some(number)
}

fn clean_lines(raw: Vec<Option<String>>) -> Vec<String> {
    raw.into_iter()
        .flatten()
        .filter(|line| !line.trim().is_empty())
        .collect()
}

impl RawCatalog {
    /// Normalizes into a [`Catalog`]. Entries without a resolvable number,
    /// or whose fields have the wrong types, are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` if no entry survives.
    pub fn normalize(self) -> Result<Catalog, CatalogError> {
        let mut episodes: BTreeMap<u32, Episode> = BTreeMap::new();
        let mut keep = |episode: Episode| {
            if let Some(previous) = episodes.insert(episode.number, episode) {
                warn!(episode = previous.number, "duplicate episode number, keeping the later entry");
            }
        };

        match self {
            Self::Keyed(entries) => {
                for (key, value) in entries {
                    let Some(number) = resolve_number(&key) else {
                        warn!(key = ?key, "skipping catalog entry with unresolvable number");
                        continue;
                    };
                    match RawEntry::deserialize(value) {
                        Ok(RawEntry::Lines(lines)) => {
                            keep(Episode::new(number, "", clean_lines(lines)));
                        }
                        Ok(RawEntry::Record(record)) => keep(record.into_episode(number)),
                        Err(_) => {
                            warn!(episode = number, "skipping catalog entry with unsupported value");
                        }
                    }
                }
            }
            Self::Records(records) => {
                for (index, value) in records.into_iter().enumerate() {
                    let record = match RawRecord::deserialize(value) {
                        Ok(record) => record,
                        Err(err) => {
                            warn!(index, error = %err, "skipping malformed catalog record");
                            continue;
                        }
                    };
                    let Some(number) = record.episode.as_ref().and_then(resolve_number) else {
                        warn!(index, "skipping catalog record without an episode number");
                        continue;
                    };
                    keep(record.into_episode(number));
                }
            }
        }

        Catalog::from_episodes(episodes.into_values())
    }
}
