//! Card data sources.
//!
//! A [`CardSource`] answers the two lookups a card needs. Network-backed
//! sources live outside this crate; [`StaticSource`] serves a local JSON
//! catalog, and [`CachedSource`] puts a [`KeyValueStore`] in front of any
//! source.

use std::collections::BTreeSet;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::trace;

use super::cache::{info_key, tags_key, CacheEntry, KeyValueStore};
use super::card::CardInfo;
use crate::core::{Error, Result};

/// Resolves card names to metadata and tags.
pub trait CardSource {
    /// Look up a card by exact name.
    fn card_info(&mut self, name: &str) -> Result<CardInfo>;

    /// Tags of a printing, lower-cased.
    fn card_tags(&mut self, set: &str, collector_number: &str) -> Result<BTreeSet<String>>;
}

impl<S: CardSource + ?Sized> CardSource for &mut S {
    fn card_info(&mut self, name: &str) -> Result<CardInfo> {
        (**self).card_info(name)
    }

    fn card_tags(&mut self, set: &str, collector_number: &str) -> Result<BTreeSet<String>> {
        (**self).card_tags(set, collector_number)
    }
}

/// One catalog entry.
#[derive(Clone, Debug, Deserialize)]
pub struct CatalogCard {
    pub info: CardInfo,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Offline source over a JSON catalog.
///
/// ```json
/// { "Sol Ring": { "info": { "name": "Sol Ring", "set": "c21",
///                           "collector_number": "263", "type_line": "Artifact" },
///                 "tags": ["mana-rock", "ramp"] } }
/// ```
///
/// Name lookup ignores case.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    by_name: FxHashMap<String, usize>,
    by_printing: FxHashMap<(String, String), usize>,
    cards: Vec<CatalogCard>,
    lookups: usize,
}

impl StaticSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card (builder pattern).
    #[must_use]
    pub fn with_card(mut self, info: CardInfo, tags: &[&str]) -> Self {
        self.add(CatalogCard {
            info,
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        });
        self
    }

    /// Add a catalog entry under its canonical name.
    pub fn add(&mut self, card: CatalogCard) {
        self.add_named(card.info.name.clone(), card);
    }

    fn add_named(&mut self, name: String, card: CatalogCard) {
        let i = self.cards.len();
        self.by_name.insert(name.to_lowercase(), i);
        self.by_printing.insert(
            (card.info.set.to_lowercase(), card.info.collector_number.clone()),
            i,
        );
        self.cards.push(card);
    }

    /// Parse a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: FxHashMap<String, CatalogCard> = serde_json::from_str(json)?;
        let mut source = Self::new();
        for (name, card) in raw {
            source.add_named(name, card);
        }
        Ok(source)
    }

    /// Read a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Number of lookups served so far.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups
    }
}

impl CardSource for StaticSource {
    fn card_info(&mut self, name: &str) -> Result<CardInfo> {
        self.lookups += 1;
        self.by_name
            .get(&name.to_lowercase())
            .map(|&i| self.cards[i].info.clone())
            .ok_or_else(|| Error::CardNotFound(name.to_owned()))
    }

    fn card_tags(&mut self, set: &str, collector_number: &str) -> Result<BTreeSet<String>> {
        self.lookups += 1;
        let key = (set.to_lowercase(), collector_number.to_owned());
        self.by_printing
            .get(&key)
            .map(|&i| {
                self.cards[i]
                    .tags
                    .iter()
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .ok_or_else(|| Error::CardNotFound(format!("{set}/{collector_number}")))
    }
}

/// A card resolved through a [`CachedSource`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedCard {
    pub info: CardInfo,
    pub tags: BTreeSet<String>,
    /// Whether any lookup had to go to the inner source.
    pub network_used: bool,
}

/// Source with a cache in front.
#[derive(Debug)]
pub struct CachedSource<S, K> {
    source: S,
    store: K,
}

impl<S: CardSource, K: KeyValueStore> CachedSource<S, K> {
    pub fn new(source: S, store: K) -> Self {
        Self { source, store }
    }

    /// Resolve a card's info and tags, consulting the cache first.
    pub fn fetch(&mut self, name: &str) -> Result<FetchedCard> {
        let mut network_used = false;

        let key = info_key(name);
        let info = match self.store.get(&key) {
            Some(CacheEntry::Info(info)) => {
                trace!(key = %key, "cache hit");
                info.clone()
            }
            _ => {
                network_used = true;
                let info = self.source.card_info(name)?;
                self.store.insert(key, CacheEntry::Info(info.clone()));
                info
            }
        };

        let key = tags_key(&info.set, &info.collector_number);
        let tags = match self.store.get(&key) {
            Some(CacheEntry::Tags(tags)) => {
                trace!(key = %key, "cache hit");
                tags.iter().cloned().collect()
            }
            _ => {
                network_used = true;
                let tags = self.source.card_tags(&info.set, &info.collector_number)?;
                self.store
                    .insert(key, CacheEntry::Tags(tags.iter().cloned().collect()));
                tags
            }
        };

        Ok(FetchedCard {
            info,
            tags,
            network_used,
        })
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The cache store.
    pub fn store(&self) -> &K {
        &self.store
    }

    /// Split back into source and store.
    pub fn into_parts(self) -> (S, K) {
        (self.source, self.store)
    }
}
