//! Quota-constrained greedy selection.
//!
//! ## Key Types
//!
//! - `Selector` / `select`: single-pass greedy selection over a table
//! - `SelectorConfig`: exclusion mode and trace switch
//! - `Tally`: per-attribute counts, snapshotted per decision
//! - `TraceEntry`, `Decision`, `SkipReason`: why each row was taken or not
//! - `SelectionResult`: selected ids, final tally, trace, shortfalls

pub mod config;
pub mod selector;
pub mod tally;
pub mod trace;

pub use config::{ExclusionMode, SelectorConfig};
pub use selector::{select, SelectionResult, Selector};
pub use tally::{Shortfall, Tally};
pub use trace::{Decision, SkipReason, TraceEntry};
