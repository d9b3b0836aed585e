//! Sample catalog — twenty episodes with predictable content.

use tuning_catalog::{Catalog, Episode};

/// Episodes 1 through 20. Odd episodes have a subtitle `第{n}話`, even ones
/// have none. Every episode has two lines, `{n}-1` and `{n}-2`.
///
/// # Panics
///
/// Never; the catalog is non-empty by construction.
#[must_use]
pub fn sample_catalog() -> Catalog {
    Catalog::from_episodes((1..=20).map(|n| {
        let subtitle = if n % 2 == 1 { format!("第{n}話") } else { String::new() };
        Episode::new(n, subtitle, vec![format!("{n}-1"), format!("{n}-2")])
    }))
    .expect("sample catalog is non-empty")
}
