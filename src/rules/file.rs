//! Rule files.
//!
//! ```json
//! {
//!   "rules": { "ramp": 10, "draw": { "min": 8, "max": 12 } },
//!   "exclusions": { "tutor": ["tutor-land"] },
//!   "selector": { "exclusion_mode": "uniform" }
//! }
//! ```
//!
//! `rules` keeps the order it is written in. `exclusions` and `selector`
//! are optional.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::rule::RuleSpec;
use super::set::RuleSet;
use crate::core::{AttributeKey, Result};
use crate::select::SelectorConfig;

/// Parsed, not yet validated, rule file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleFile {
    /// Rules in file order.
    #[serde(default, deserialize_with = "ordered_map")]
    pub rules: Vec<(AttributeKey, RuleSpec)>,

    /// Attribute -> vetoing attributes, in file order.
    #[serde(default, deserialize_with = "ordered_map")]
    pub exclusions: Vec<(AttributeKey, Vec<AttributeKey>)>,

    /// Selector options.
    #[serde(default)]
    pub selector: SelectorConfig,
}

impl RuleFile {
    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validate into a [`RuleSet`].
    pub fn to_rule_set(&self) -> Result<RuleSet> {
        let mut set = RuleSet::new();
        for (attribute, spec) in &self.rules {
            let rule = spec.into_rule(attribute)?;
            set.insert(attribute.clone(), rule)?;
        }
        for (attribute, vetoed_by) in &self.exclusions {
            for by in vetoed_by {
                set = set.exclude(attribute, by)?;
            }
        }
        Ok(set)
    }
}

/// Deserialize a map into a vec of pairs, keeping source order.
fn ordered_map<'de, D, K, V>(deserializer: D) -> std::result::Result<Vec<(K, V)>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    struct OrderedVisitor<K, V>(PhantomData<(K, V)>);

    impl<'de, K, V> Visitor<'de> for OrderedVisitor<K, V>
    where
        K: Deserialize<'de>,
        V: Deserialize<'de>,
    {
        type Value = Vec<(K, V)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map keyed by attribute name")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                out.push(entry);
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(OrderedVisitor(PhantomData))
}
