//! A single table row: an identifier plus boolean attribute flags.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::AttributeKey;

/// One row of an [`AttributeTable`](super::AttributeTable).
///
/// Flags that are not present read as `false`.
///
/// ## Example
///
/// ```
/// use deck_quota::table::AttributeRow;
///
/// let row = AttributeRow::new("Sol Ring")
///     .with_flag("ramp", true)
///     .with_flag("artifact", true);
///
/// assert!(row.has("ramp"));
/// assert!(!row.has("draw"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRow {
    /// Row identifier (card name). Unique within a table.
    pub id: String,

    /// Attribute flags.
    #[serde(default)]
    pub flags: FxHashMap<AttributeKey, bool>,
}

impl AttributeRow {
    /// Create a row with no flags.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            flags: FxHashMap::default(),
        }
    }

    /// Set a flag (builder pattern).
    #[must_use]
    pub fn with_flag(mut self, key: impl Into<AttributeKey>, value: bool) -> Self {
        self.flags.insert(key.into(), value);
        self
    }

    /// Whether the attribute is set true on this row.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    /// Attributes set true on this row, in no particular order.
    pub fn true_flags(&self) -> impl Iterator<Item = &AttributeKey> {
        self.flags.iter().filter(|(_, v)| **v).map(|(k, _)| k)
    }
}
