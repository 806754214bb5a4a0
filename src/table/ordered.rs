//! Ordered attribute table.
//!
//! Row order is significant: it is the order in which the selector
//! considers candidates. The table keeps an id index for lookup but never
//! reorders rows on its own.

use rustc_hash::FxHashMap;

use super::row::AttributeRow;
use crate::core::{AttributeKey, Error, Result, TableRng};

/// Ordered, id-unique collection of [`AttributeRow`]s.
///
/// ## Example
///
/// ```
/// use deck_quota::table::{AttributeRow, AttributeTable};
///
/// let mut table = AttributeTable::new();
/// table.push(AttributeRow::new("Sol Ring").with_flag("ramp", true)).unwrap();
/// table.push(AttributeRow::new("Brainstorm").with_flag("draw", true)).unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert!(table.get("Brainstorm").unwrap().has("draw"));
/// assert!(table.push(AttributeRow::new("Sol Ring")).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct AttributeTable {
    rows: Vec<AttributeRow>,
    index: FxHashMap<String, usize>,
}

impl AttributeTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rows, in the given order.
    pub fn from_rows(rows: impl IntoIterator<Item = AttributeRow>) -> Result<Self> {
        let mut table = Self::new();
        for row in rows {
            table.push(row)?;
        }
        Ok(table)
    }

    /// Append a row.
    ///
    /// Fails with [`Error::DuplicateRow`] if the id is already present.
    pub fn push(&mut self, row: AttributeRow) -> Result<()> {
        if self.index.contains_key(&row.id) {
            return Err(Error::DuplicateRow(row.id));
        }
        self.index.insert(row.id.clone(), self.rows.len());
        self.rows.push(row);
        Ok(())
    }

    /// Look up a row by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&AttributeRow> {
        self.index.get(id).map(|&i| &self.rows[i])
    }

    /// Check if a row id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in table order.
    #[must_use]
    pub fn rows(&self) -> &[AttributeRow] {
        &self.rows
    }

    /// Iterate rows in table order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeRow> {
        self.rows.iter()
    }

    /// Every attribute name mentioned by any row, sorted.
    #[must_use]
    pub fn attributes(&self) -> Vec<AttributeKey> {
        let mut keys: Vec<AttributeKey> = self
            .rows
            .iter()
            .flat_map(|r| r.flags.keys())
            .cloned()
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Count rows with each attribute set true.
    ///
    /// Results follow the order of `attributes`.
    #[must_use]
    pub fn count<'a, I>(&self, attributes: I) -> Vec<(AttributeKey, usize)>
    where
        I: IntoIterator<Item = &'a AttributeKey>,
    {
        attributes
            .into_iter()
            .map(|key| {
                let n = self.rows.iter().filter(|r| r.has(key.as_str())).count();
                (key.clone(), n)
            })
            .collect()
    }

    /// A reordered copy of this table, deterministic in `seed`.
    #[must_use]
    pub fn shuffled(&self, seed: u64) -> Self {
        let mut rows = self.rows.clone();
        TableRng::new(seed).shuffle(&mut rows);

        let index = rows
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        Self { rows, index }
    }
}

impl<'a> IntoIterator for &'a AttributeTable {
    type Item = &'a AttributeRow;
    type IntoIter = std::slice::Iter<'a, AttributeRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
