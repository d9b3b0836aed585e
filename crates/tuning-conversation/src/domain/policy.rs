//! Free/premium access policy.

use std::collections::BTreeSet;

use tuning_catalog::Catalog;

/// Whether a requested episode may be released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Release the episode.
    Allowed,
    /// No such published episode.
    OutOfRange,
    /// Premium episode and the user is not entitled.
    PremiumRequired,
}

/// Tiered access rules over the published episode range.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    free_threshold: u32,
    max_episode: u32,
    published: BTreeSet<u32>,
}

impl AccessPolicy {
    /// Episodes `1..=free_threshold` are free; `published` numbers above
    /// `max_episode` are treated as unpublished. `max_episode` never exceeds
    /// the highest published number.
    #[must_use]
    pub fn new(
        free_threshold: u32,
        max_episode: u32,
        published: impl IntoIterator<Item = u32>,
    ) -> Self {
        let published: BTreeSet<u32> = published.into_iter().collect();
        let max_episode = published.last().map_or(0, |&top| max_episode.min(top));
        Self {
            free_threshold,
            max_episode,
            published,
        }
    }

    /// Policy for the episodes of `catalog`. Without an explicit
    /// `max_episode` the highest catalog number is the maximum; an explicit
    /// one above it is lowered to it.
    #[must_use]
    pub fn for_catalog(catalog: &Catalog, free_threshold: u32, max_episode: Option<u32>) -> Self {
        let max_episode = max_episode.unwrap_or_else(|| catalog.max_number());
        Self::new(free_threshold, max_episode, catalog.numbers())
    }

    /// Highest episode number that can be served.
    #[must_use]
    pub fn max_episode(&self) -> u32 {
        self.max_episode
    }

    /// Highest episode number that is free.
    #[must_use]
    pub fn free_threshold(&self) -> u32 {
        self.free_threshold
    }

    /// `true` if `number` is in `1..=max_episode` and present in the catalog.
    #[must_use]
    pub fn is_published(&self, number: u32) -> bool {
        (1..=self.max_episode).contains(&number) && self.published.contains(&number)
    }

    /// `true` if releasing `number` depends on the user's entitlement.
    #[must_use]
    pub fn requires_entitlement(&self, number: u32) -> bool {
        self.is_published(number) && number > self.free_threshold
    }

    /// Decides access to `number` for a user whose entitlement is
    /// `is_entitled`. Pure and deterministic.
    #[must_use]
    pub fn decide(&self, number: u32, is_entitled: bool) -> AccessDecision {
        if !self.is_published(number) {
            AccessDecision::OutOfRange
        } else if number <= self.free_threshold || is_entitled {
            AccessDecision::Allowed
        } else {
            AccessDecision::PremiumRequired
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FREE: u32 = 5;
    const MAX: u32 = 20;

    fn policy() -> AccessPolicy {
        AccessPolicy::new(FREE, MAX, 1..=MAX)
    }

    #[test]
    fn test_free_episodes_ignore_entitlement() {
        let policy = policy();
        for number in 1..=FREE {
            assert_eq!(policy.decide(number, false), AccessDecision::Allowed, "{number}");
            assert_eq!(policy.decide(number, true), AccessDecision::Allowed, "{number}");
            assert!(!policy.requires_entitlement(number));
        }
    }

    #[test]
    fn test_premium_episodes_follow_entitlement() {
        let policy = policy();
        for number in FREE + 1..=MAX {
            assert_eq!(
                policy.decide(number, false),
                AccessDecision::PremiumRequired,
                "{number}"
            );
            assert_eq!(policy.decide(number, true), AccessDecision::Allowed, "{number}");
            assert!(policy.requires_entitlement(number));
        }
    }

    #[test]
    fn test_out_of_range_regardless_of_entitlement() {
        let policy = policy();
        for number in [0, MAX + 1, 21, 99, u32::MAX] {
            assert_eq!(policy.decide(number, false), AccessDecision::OutOfRange, "{number}");
            assert_eq!(policy.decide(number, true), AccessDecision::OutOfRange, "{number}");
            assert!(!policy.requires_entitlement(number));
        }
    }

    #[test]
    fn test_gaps_in_catalog_are_out_of_range() {
        let policy = AccessPolicy::new(FREE, MAX, [1, 2, 4, 8]);

        assert_eq!(policy.decide(3, true), AccessDecision::OutOfRange);
        assert_eq!(policy.decide(7, true), AccessDecision::OutOfRange);
        assert_eq!(policy.decide(8, true), AccessDecision::Allowed);
        assert_eq!(policy.decide(8, false), AccessDecision::PremiumRequired);
    }

    #[test]
    fn test_max_episode_caps_published_numbers() {
        let policy = AccessPolicy::new(FREE, 10, 1..=MAX);

        assert_eq!(policy.decide(10, true), AccessDecision::Allowed);
        assert_eq!(policy.decide(11, true), AccessDecision::OutOfRange);
    }

    #[test]
    fn test_max_episode_is_lowered_to_highest_published() {
        let policy = AccessPolicy::new(FREE, 30, 1..=MAX);

        assert_eq!(policy.max_episode(), MAX);
        assert_eq!(policy.decide(25, true), AccessDecision::OutOfRange);
        assert_eq!(AccessPolicy::new(FREE, 30, std::iter::empty()).max_episode(), 0);
    }

    #[test]
    fn test_zero_threshold_makes_everything_premium() {
        let policy = AccessPolicy::new(0, MAX, 1..=MAX);

        assert_eq!(policy.decide(1, false), AccessDecision::PremiumRequired);
        assert_eq!(policy.decide(1, true), AccessDecision::Allowed);
    }

    #[test]
    fn test_for_catalog_defaults_max_to_highest_number() {
        let catalog = tuning_catalog::Catalog::from_episodes(
            [1, 2, 12].map(|n| tuning_catalog::Episode::new(n, "", vec!["line".to_owned()])),
        )
        .unwrap();

        let policy = AccessPolicy::for_catalog(&catalog, FREE, None);

        assert_eq!(policy.max_episode(), 12);
        assert_eq!(policy.free_threshold(), FREE);
        assert!(policy.is_published(12));
        assert!(!policy.is_published(3));
    }
}
