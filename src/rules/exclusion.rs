//! Mutually exclusive attributes.
//!
//! An exclusion says "a row with Y cannot count toward X". The usual case
//! is a broad tag and its narrower sibling: a land that tutors is tagged
//! both `tutor` and `tutor-land`, and should not fill the `tutor` quota.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{AttributeKey, Error, Result};
use crate::table::AttributeRow;

/// Attribute -> attributes that veto it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExclusionMap {
    vetoes: FxHashMap<AttributeKey, SmallVec<[AttributeKey; 2]>>,
}

impl ExclusionMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `by` vetoes `attribute`.
    ///
    /// Repeated pairs are ignored. An attribute vetoing itself is rejected
    /// with [`Error::InvalidExclusion`]: such a rule could never be filled.
    pub fn exclude(
        &mut self,
        attribute: impl Into<AttributeKey>,
        by: impl Into<AttributeKey>,
    ) -> Result<()> {
        let attribute = attribute.into();
        let by = by.into();
        if attribute == by {
            return Err(Error::InvalidExclusion { attribute });
        }
        let list = self.vetoes.entry(attribute).or_default();
        if !list.contains(&by) {
            list.push(by);
        }
        Ok(())
    }

    /// Attributes that veto `attribute`, in insertion order.
    #[must_use]
    pub fn vetoes(&self, attribute: &str) -> &[AttributeKey] {
        self.vetoes.get(attribute).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// First attribute true on `row` that vetoes `attribute`.
    #[must_use]
    pub fn vetoing<'a>(&'a self, attribute: &str, row: &AttributeRow) -> Option<&'a AttributeKey> {
        self.vetoes(attribute).iter().find(|by| row.has(by.as_str()))
    }

    /// Number of vetoed attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vetoes.len()
    }

    /// Check if no exclusions are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vetoes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vetoing() {
        let mut map = ExclusionMap::new();
        map.exclude("tutor", "tutor-land").unwrap();

        let land = AttributeRow::new("Crop Rotation")
            .with_flag("tutor", true)
            .with_flag("tutor-land", true);
        let plain = AttributeRow::new("Demonic Tutor").with_flag("tutor", true);

        assert_eq!(map.vetoing("tutor", &land).map(|k| k.as_str()), Some("tutor-land"));
        assert!(map.vetoing("tutor", &plain).is_none());
        assert!(map.vetoing("tutor-land", &land).is_none());
    }

    #[test]
    fn test_false_flag_does_not_veto() {
        let mut map = ExclusionMap::new();
        map.exclude("tutor", "tutor-land").unwrap();

        let row = AttributeRow::new("X")
            .with_flag("tutor", true)
            .with_flag("tutor-land", false);
        assert!(map.vetoing("tutor", &row).is_none());
    }

    #[test]
    fn test_duplicates_ignored() {
        let mut map = ExclusionMap::new();
        map.exclude("tutor", "tutor-land").unwrap();
        map.exclude("tutor", "tutor-land").unwrap();
        map.exclude("tutor", "tutor-artifact").unwrap();

        let names: Vec<_> = map.vetoes("tutor").iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["tutor-land", "tutor-artifact"]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_self_exclusion_rejected() {
        let mut map = ExclusionMap::new();
        assert!(matches!(
            map.exclude("ramp", "ramp"),
            Err(Error::InvalidExclusion { .. })
        ));
        assert!(map.is_empty());
    }
}
