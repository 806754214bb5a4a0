//! Per-attribute quota rules.

use serde::{Deserialize, Serialize};

use crate::core::{AttributeKey, Error, Result};

/// Quota for one attribute: at least `min` rows, at most `max` rows.
///
/// An absent `max` is unbounded. `min <= max` is enforced on construction,
/// so a `Rule` in hand is always valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Rule {
    min: u32,
    max: Option<u32>,
}

impl Rule {
    /// A rule with a minimum and no maximum.
    #[must_use]
    pub const fn at_least(min: u32) -> Self {
        Self { min, max: None }
    }

    /// A validated rule for `attribute`.
    ///
    /// Fails with [`Error::InvalidRule`] when `min > max`.
    pub fn new(attribute: &AttributeKey, min: u32, max: Option<u32>) -> Result<Self> {
        match max {
            Some(max) if min > max => Err(Error::InvalidRule {
                attribute: attribute.clone(),
                min,
                max,
            }),
            _ => Ok(Self { min, max }),
        }
    }

    /// Minimum required count (0 = no requirement).
    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Maximum allowed count, if bounded.
    #[must_use]
    pub const fn max(&self) -> Option<u32> {
        self.max
    }

    /// Whether a tally of `count` still falls short of the minimum.
    #[must_use]
    pub const fn needs(&self, count: u32) -> bool {
        count < self.min
    }

    /// Whether a tally of `count` has reached the maximum.
    #[must_use]
    pub fn is_capped(&self, count: u32) -> bool {
        self.max.is_some_and(|max| count >= max)
    }

    /// Whether a bounded rule can still take another row.
    ///
    /// Unbounded rules report `false`: they never take extra contributions.
    #[must_use]
    pub fn has_room(&self, count: u32) -> bool {
        self.max.is_some_and(|max| count < max)
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.max {
            Some(max) => write!(f, "min {}, max {}", self.min, max),
            None => write!(f, "min {}", self.min),
        }
    }
}

/// Rule as written in a configuration file.
///
/// Either a bare integer (minimum only) or an object with optional
/// `min`/`max`. Any other key is an error:
///
/// ```
/// use deck_quota::rules::RuleSpec;
///
/// let bare: RuleSpec = serde_json::from_str("10").unwrap();
/// let full: RuleSpec = serde_json::from_str(r#"{"min": 8, "max": 12}"#).unwrap();
/// assert_eq!(bare, RuleSpec::Min(10));
/// assert_eq!(full, RuleSpec::Bounds { min: 8, max: Some(12) });
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum RuleSpec {
    /// Bare minimum.
    Min(u32),
    /// Explicit bounds.
    Bounds {
        #[serde(default)]
        min: u32,
        #[serde(default)]
        max: Option<u32>,
    },
}

impl RuleSpec {
    /// Build from loose `key -> value` pairs, as handed over by bindings.
    ///
    /// Goes through the same shape as a config file, so keys other than
    /// `min`/`max` fail with [`Error::Json`].
    pub fn from_fields<K: Into<String>>(
        fields: impl IntoIterator<Item = (K, Option<u32>)>,
    ) -> Result<Self> {
        let object: serde_json::Map<String, serde_json::Value> = fields
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Ok(serde_json::from_value(serde_json::Value::Object(object))?)
    }

    /// Normalize into a validated [`Rule`].
    pub fn into_rule(self, attribute: &AttributeKey) -> Result<Rule> {
        match self {
            RuleSpec::Min(min) => Ok(Rule::at_least(min)),
            RuleSpec::Bounds { min, max } => Rule::new(attribute, min, max),
        }
    }
}

impl From<Rule> for RuleSpec {
    fn from(rule: Rule) -> Self {
        match rule.max {
            None => RuleSpec::Min(rule.min),
            Some(_) => RuleSpec::Bounds {
                min: rule.min,
                max: rule.max,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> AttributeKey {
        AttributeKey::new("draw")
    }

    #[test]
    fn test_min_greater_than_max_rejected() {
        let err = Rule::new(&key(), 3, Some(2)).unwrap_err();
        assert!(matches!(err, Error::InvalidRule { min: 3, max: 2, .. }));
    }

    #[test]
    fn test_equal_bounds_allowed() {
        let rule = Rule::new(&key(), 2, Some(2)).unwrap();
        assert_eq!(rule.min(), 2);
        assert_eq!(rule.max(), Some(2));
    }

    #[test]
    fn test_default_is_no_requirement() {
        let rule = Rule::default();
        assert!(!rule.needs(0));
        assert!(!rule.is_capped(1_000));
    }

    #[test]
    fn test_bounds_checks() {
        let rule = Rule::new(&key(), 1, Some(3)).unwrap();
        assert!(rule.needs(0));
        assert!(!rule.needs(1));
        assert!(rule.has_room(2));
        assert!(!rule.has_room(3));
        assert!(rule.is_capped(3));
    }

    #[test]
    fn test_unbounded_has_no_room() {
        let rule = Rule::at_least(2);
        assert!(!rule.has_room(0));
        assert!(!rule.is_capped(u32::MAX));
    }

    #[test]
    fn test_misspelled_bound_rejected() {
        assert!(serde_json::from_str::<RuleSpec>(r#"{"minimum": 10}"#).is_err());
        assert!(serde_json::from_str::<RuleSpec>(r#"{"min": 1, "maxx": 4}"#).is_err());
    }

    #[test]
    fn test_from_fields() {
        let spec = RuleSpec::from_fields([("min", Some(2)), ("max", Some(5))]).unwrap();
        assert_eq!(spec, RuleSpec::Bounds { min: 2, max: Some(5) });

        let spec = RuleSpec::from_fields([("min", Some(1)), ("max", None)]).unwrap();
        assert_eq!(spec.into_rule(&key()).unwrap(), Rule::at_least(1));

        let err = RuleSpec::from_fields([("minimum", Some(10))]).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_spec_max_only() {
        let spec: RuleSpec = serde_json::from_str(r#"{"max": 3}"#).unwrap();
        let rule = spec.into_rule(&key()).unwrap();
        assert_eq!(rule, Rule::new(&key(), 0, Some(3)).unwrap());
    }

    #[test]
    fn test_spec_invalid_bounds() {
        let spec: RuleSpec = serde_json::from_str(r#"{"min": 4, "max": 1}"#).unwrap();
        assert!(spec.into_rule(&key()).is_err());
    }

    #[test]
    fn test_spec_rejects_negative() {
        assert!(serde_json::from_str::<RuleSpec>("-1").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rule::at_least(4).to_string(), "min 4");
        assert_eq!(Rule::new(&key(), 1, Some(2)).unwrap().to_string(), "min 1, max 2");
    }
}
