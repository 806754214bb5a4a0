//! Card data collection: the layer that produces attribute tables.
//!
//! The selector never calls into this module. It only consumes the
//! finished [`AttributeTable`](crate::table::AttributeTable).
//!
//! ## Key Types
//!
//! - `CardInfo`: card lookup result (set, collector number, type line)
//! - `CardSource`: trait for lookups; `StaticSource` serves a JSON catalog
//! - `KeyValueStore`: explicit cache; `MemoryStore` and `FileStore`
//! - `CachedSource`: source + store, reports whether lookups missed
//! - `TableBuilder`: card list + target tags/types -> table

pub mod builder;
pub mod cache;
pub mod card;
pub mod source;

pub use builder::{BuildFailure, BuildOutcome, TableBuilder, DEFAULT_DELAY};
pub use cache::{info_key, tags_key, CacheEntry, FileStore, KeyValueStore, MemoryStore};
pub use card::{parse_tagger_response, parse_type_line, CardInfo, GOOD_STANDING};
pub use source::{CachedSource, CardSource, CatalogCard, FetchedCard, StaticSource};
