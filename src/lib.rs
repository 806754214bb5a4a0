//! # deck-quota
//!
//! Quota-constrained greedy selection over tables of tagged cards.
//!
//! Given cards flagged with boolean tags and types, and a rule set of
//! per-attribute minimums and maximums with exclusions, pick an ordered
//! subset that fills every minimum without exceeding any maximum, and
//! record why each card was taken or passed over.
//!
//! ## Design Principles
//!
//! 1. **Greedy and order-dependent**: one pass in table order, no
//!    backtracking. The same inputs always give the same deck; the deck is
//!    not guaranteed to be the smallest one possible.
//!
//! 2. **Total**: selection never fails. Bad rules are rejected when the
//!    `RuleSet` is built; unreachable minimums are reported in the result.
//!
//! 3. **Pure core**: the selector does no I/O. Fetching card data and
//!    rendering output are separate layers around it.
//!
//! ## Modules
//!
//! - `core`: attribute keys, errors, seeded RNG
//! - `table`: attribute rows and ordered tables, TSV/JSON files
//! - `rules`: quota rules, exclusions, rule files
//! - `select`: the greedy selector, tally and decision trace
//! - `fetch`: card sources, cache store, table building
//! - `report`: text rendering of results

pub mod core;
pub mod fetch;
pub mod report;
pub mod rules;
pub mod select;
pub mod table;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{AttributeKey, Error, Result, TableRng};

pub use crate::table::{AttributeRow, AttributeTable};

pub use crate::rules::{ExclusionMap, Rule, RuleFile, RuleSet, RuleSpec};

pub use crate::select::{
    select, Decision, ExclusionMode, SelectionResult, Selector, SelectorConfig, Shortfall,
    SkipReason, Tally, TraceEntry,
};

pub use crate::fetch::{
    CachedSource, CardInfo, CardSource, FileStore, KeyValueStore, MemoryStore, StaticSource,
    TableBuilder,
};
