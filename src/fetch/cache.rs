//! Key-value cache for fetched card data.
//!
//! The store is an explicit value: open it at the start of a run, hand it
//! to a [`CachedSource`](super::CachedSource), close it at the end. Nothing
//! is global.
//!
//! ## Keys
//!
//! - `info:<card name, lower-cased>` -> [`CacheEntry::Info`]
//! - `tags:<set code, lower-cased>:<collector number>` -> [`CacheEntry::Tags`]

use std::io::Write;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::card::CardInfo;
use crate::core::Result;

/// A cached value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheEntry {
    Info(CardInfo),
    Tags(Vec<String>),
}

/// Cache key for a card lookup.
#[must_use]
pub fn info_key(card_name: &str) -> String {
    format!("info:{}", card_name.to_lowercase())
}

/// Cache key for a printing's tags.
#[must_use]
pub fn tags_key(set: &str, collector_number: &str) -> String {
    format!("tags:{}:{}", set.to_lowercase(), collector_number)
}

/// Key-value store behind a [`CachedSource`](super::CachedSource).
pub trait KeyValueStore {
    /// Look up a key.
    fn get(&self, key: &str) -> Option<&CacheEntry>;

    /// Insert or replace a value.
    fn insert(&mut self, key: String, value: CacheEntry);

    /// Persist pending writes. No-op for in-memory stores.
    fn flush(&mut self) -> Result<()>;

    /// Check if a key is present.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Process-lifetime store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, CacheEntry>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    fn insert(&mut self, key: String, value: CacheEntry) {
        self.entries.insert(key, value);
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Store persisted to a single bincode file.
///
/// The whole map is loaded on [`open`](Self::open) and rewritten on
/// [`flush`](Self::flush). Writes go to a sibling temp file first and are
/// renamed into place. A store dropped with unflushed writes tries to
/// flush and logs on failure; call [`close`](Self::close) to see the error.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: FxHashMap<String, CacheEntry>,
    dirty: bool,
}

impl FileStore {
    /// Open (or start) a cache file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read(&path) {
            Ok(bytes) => bincode::deserialize(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FxHashMap::default(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), entries = entries.len(), "opened cache");
        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    /// Flush and release the store.
    pub fn close(mut self) -> Result<()> {
        self.flush()
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    fn insert(&mut self, key: String, value: CacheEntry) {
        self.entries.insert(key, value);
        self.dirty = true;
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let bytes = bincode::serialize(&self.entries)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        {
            let mut file = std::fs::File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, &self.path)?;

        self.dirty = false;
        debug!(path = %self.path.display(), entries = self.entries.len(), "flushed cache");
        Ok(())
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.flush() {
                warn!(path = %self.path.display(), error = %e, "failed to flush cache on drop");
            }
        }
    }
}
