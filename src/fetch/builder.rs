//! Turning card lists into attribute tables.

use std::time::Duration;

use rustc_hash::FxHashSet;
use tracing::{info, warn};

use super::cache::KeyValueStore;
use super::source::{CachedSource, CardSource};
use crate::core::{AttributeKey, Error};
use crate::table::{AttributeRow, AttributeTable};

/// Default pause after a card that needed uncached lookups.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// A card that could not be added to the table.
#[derive(Debug)]
pub struct BuildFailure {
    pub card: String,
    pub error: Error,
}

/// Result of [`TableBuilder::build`].
#[derive(Debug)]
pub struct BuildOutcome {
    /// Successfully resolved cards, in input order.
    pub table: AttributeTable,
    /// Column order: target tags, then target types.
    pub columns: Vec<AttributeKey>,
    /// Cards that failed to resolve. The run continues past them.
    pub failures: Vec<BuildFailure>,
    /// Names skipped because they already appeared earlier in the list.
    pub duplicates: Vec<String>,
}

/// Builds a table with one boolean column per target tag and type.
///
/// ## Example
///
/// ```
/// use deck_quota::fetch::{CachedSource, CardInfo, MemoryStore, StaticSource, TableBuilder};
/// use std::time::Duration;
///
/// let source = StaticSource::new().with_card(
///     CardInfo {
///         name: "Llanowar Elves".into(),
///         set: "dom".into(),
///         collector_number: "168".into(),
///         type_line: "Creature — Elf Druid".into(),
///     },
///     &["mana-dork", "ramp"],
/// );
/// let mut cached = CachedSource::new(source, MemoryStore::new());
///
/// let outcome = TableBuilder::new(["Ramp", "draw"], ["Creature"])
///     .with_delay(Duration::ZERO)
///     .build(["Llanowar Elves"], &mut cached);
///
/// let row = outcome.table.get("Llanowar Elves").unwrap();
/// assert!(row.has("ramp") && row.has("creature") && !row.has("draw"));
/// ```
#[derive(Clone, Debug)]
pub struct TableBuilder {
    tags: Vec<AttributeKey>,
    types: Vec<AttributeKey>,
    delay: Duration,
}

impl TableBuilder {
    /// Target tags and types; names are normalized.
    pub fn new<T, U>(tags: T, types: U) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        U: IntoIterator,
        U::Item: AsRef<str>,
    {
        let normalize = |names: Vec<AttributeKey>| {
            let mut seen = FxHashSet::default();
            names
                .into_iter()
                .filter(|k| !k.as_str().is_empty() && seen.insert(k.clone()))
                .collect::<Vec<_>>()
        };
        Self {
            tags: normalize(tags.into_iter().map(|t| AttributeKey::normalized(t.as_ref())).collect()),
            types: normalize(types.into_iter().map(|t| AttributeKey::normalized(t.as_ref())).collect()),
            delay: DEFAULT_DELAY,
        }
    }

    /// Pause between cards that needed uncached lookups.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Column order of built tables.
    #[must_use]
    pub fn columns(&self) -> Vec<AttributeKey> {
        self.tags.iter().chain(&self.types).cloned().collect()
    }

    /// Resolve every card and build the table.
    ///
    /// Blank names are ignored. Failures are logged and collected; they do
    /// not stop the run.
    pub fn build<I, S, C, K>(&self, cards: I, source: &mut CachedSource<C, K>) -> BuildOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        C: CardSource,
        K: KeyValueStore,
    {
        let mut table = AttributeTable::new();
        let mut failures = Vec::new();
        let mut duplicates = Vec::new();

        for card in cards {
            let name = card.as_ref().trim();
            if name.is_empty() {
                continue;
            }

            let network_used = match source.fetch(name) {
                Ok(fetched) => {
                    let types = fetched.info.types();
                    let mut row = AttributeRow::new(name);
                    for tag in &self.tags {
                        row = row.with_flag(tag, fetched.tags.contains(tag.as_str()));
                    }
                    for ty in &self.types {
                        row = row.with_flag(ty, types.contains(ty.as_str()));
                    }
                    match table.push(row) {
                        Ok(()) => info!(
                            card = name,
                            tags = fetched.tags.len(),
                            cached = !fetched.network_used,
                            "processed"
                        ),
                        Err(Error::DuplicateRow(id)) => {
                            warn!(card = %id, "duplicate card name, keeping first occurrence");
                            duplicates.push(id);
                        }
                        Err(error) => failures.push(BuildFailure {
                            card: name.to_owned(),
                            error,
                        }),
                    }
                    fetched.network_used
                }
                Err(error) => {
                    warn!(card = name, %error, "failed to resolve card");
                    failures.push(BuildFailure {
                        card: name.to_owned(),
                        error,
                    });
                    true
                }
            };

            if network_used && !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
        }

        BuildOutcome {
            table,
            columns: self.columns(),
            failures,
            duplicates,
        }
    }
}
