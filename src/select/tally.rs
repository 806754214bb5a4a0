//! Running per-attribute counts.
//!
//! A `Tally` is indexed by rule position. Counts live in a persistent
//! vector so the selector can hand out a snapshot per decision without
//! copying.

use std::sync::Arc;

use im::Vector;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::core::AttributeKey;
use crate::rules::RuleSet;

/// Attribute -> count, in rule declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tally {
    keys: Arc<[AttributeKey]>,
    counts: Vector<u32>,
}

/// An attribute whose minimum was not reached.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Shortfall {
    pub attribute: AttributeKey,
    pub have: u32,
    pub need: u32,
}

impl Tally {
    /// A zeroed tally for every rule in `rules`.
    #[must_use]
    pub fn new(rules: &RuleSet) -> Self {
        let keys: Arc<[AttributeKey]> = rules.attributes().cloned().collect();
        let counts = std::iter::repeat(0).take(keys.len()).collect();
        Self { keys, counts }
    }

    /// Count for an attribute, if it is ruled.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<u32> {
        self.keys
            .iter()
            .position(|k| k.as_str() == attribute)
            .map(|i| self.counts[i])
    }

    /// Count at a rule position.
    #[must_use]
    pub fn at(&self, position: usize) -> u32 {
        self.counts[position]
    }

    pub(crate) fn increment(&mut self, position: usize) {
        self.counts[position] += 1;
    }

    /// Iterate `(attribute, count)` in rule order.
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeKey, u32)> + '_ {
        self.keys.iter().zip(self.counts.iter().copied())
    }

    /// Number of tallied attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if nothing is tallied (no rules).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether every minimum in `rules` is met.
    ///
    /// `rules` must be the set this tally was created from.
    #[must_use]
    pub fn meets(&self, rules: &RuleSet) -> bool {
        rules
            .entries()
            .iter()
            .zip(self.counts.iter())
            .all(|((_, rule), &count)| !rule.needs(count))
    }

    /// Minimums in `rules` that are not met, in rule order.
    #[must_use]
    pub fn shortfalls(&self, rules: &RuleSet) -> Vec<Shortfall> {
        rules
            .entries()
            .iter()
            .zip(self.counts.iter())
            .filter(|((_, rule), count)| rule.needs(**count))
            .map(|((key, rule), &count)| Shortfall {
                attribute: key.clone(),
                have: count,
                need: rule.min(),
            })
            .collect()
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, count) in self.iter() {
            map.serialize_entry(key, &count)?;
        }
        map.end()
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (key, count) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{key}={count}")?;
            first = false;
        }
        Ok(())
    }
}
