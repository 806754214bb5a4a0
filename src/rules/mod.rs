//! Quota rules: per-attribute bounds and exclusions.
//!
//! ## Key Types
//!
//! - `Rule`: validated `{min, max?}` for one attribute
//! - `RuleSpec`: bare integer or `{min, max}` as written in config
//! - `ExclusionMap`: attribute -> vetoing attributes
//! - `RuleSet`: ordered rules plus exclusions, the selector's rule input
//! - `RuleFile`: JSON rule file

pub mod exclusion;
pub mod file;
pub mod rule;
pub mod set;

pub use exclusion::ExclusionMap;
pub use file::RuleFile;
pub use rule::{Rule, RuleSpec};
pub use set::RuleSet;
