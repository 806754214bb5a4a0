//! Ordered rule sets.

use rustc_hash::FxHashMap;

use super::exclusion::ExclusionMap;
use super::rule::Rule;
use crate::core::{AttributeKey, Error, Result};

/// Quota rules in declaration order, plus exclusions.
///
/// Declaration order is the tally's reporting order; it has no effect on
/// which rows get selected.
///
/// ## Example
///
/// ```
/// use deck_quota::rules::RuleSet;
///
/// let rules = RuleSet::new()
///     .rule("ramp", 10, None)?
///     .rule("tutor", 1, Some(3))?
///     .exclude("tutor", "tutor-land")?;
///
/// assert_eq!(rules.len(), 2);
/// assert_eq!(rules.get("tutor").unwrap().max(), Some(3));
/// # Ok::<(), deck_quota::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    entries: Vec<(AttributeKey, Rule)>,
    index: FxHashMap<AttributeKey, usize>,
    exclusions: ExclusionMap,
}

impl RuleSet {
    /// Create an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validated rule (builder pattern).
    pub fn rule(mut self, attribute: impl Into<AttributeKey>, min: u32, max: Option<u32>) -> Result<Self> {
        let attribute = attribute.into();
        let rule = Rule::new(&attribute, min, max)?;
        self.insert(attribute, rule)?;
        Ok(self)
    }

    /// Add an exclusion (builder pattern).
    pub fn exclude(mut self, attribute: impl Into<AttributeKey>, by: impl Into<AttributeKey>) -> Result<Self> {
        self.exclusions.exclude(attribute, by)?;
        Ok(self)
    }

    /// Replace the exclusion map.
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: ExclusionMap) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Append a rule.
    ///
    /// Fails with [`Error::DuplicateRule`] if the attribute already has one.
    pub fn insert(&mut self, attribute: AttributeKey, rule: Rule) -> Result<()> {
        if self.index.contains_key(&attribute) {
            return Err(Error::DuplicateRule(attribute));
        }
        self.index.insert(attribute.clone(), self.entries.len());
        self.entries.push((attribute, rule));
        Ok(())
    }

    /// Rule for an attribute.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&Rule> {
        self.index.get(attribute).map(|&i| &self.entries[i].1)
    }

    /// Position of an attribute in declaration order.
    #[must_use]
    pub fn position(&self, attribute: &str) -> Option<usize> {
        self.index.get(attribute).copied()
    }

    /// Rules in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[(AttributeKey, Rule)] {
        &self.entries
    }

    /// Iterate rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeKey, &Rule)> {
        self.entries.iter().map(|(k, r)| (k, r))
    }

    /// Ruled attribute names in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// The exclusion map.
    #[must_use]
    pub fn exclusions(&self) -> &ExclusionMap {
        &self.exclusions
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
