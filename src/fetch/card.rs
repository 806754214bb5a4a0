//! Card metadata and response parsing.
//!
//! Two external data shapes feed a card's attributes:
//!
//! - the card lookup (name -> set, collector number, type line), and
//! - the tagger GraphQL response (tags and their ancestor tags, each with a
//!   moderation status).
//!
//! Only the parsing lives here; transport is the [`CardSource`]'s business.
//!
//! [`CardSource`]: super::CardSource

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Status a tag must have to count.
pub const GOOD_STANDING: &str = "GOOD_STANDING";

/// Card lookup result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInfo {
    /// Canonical card name.
    pub name: String,

    /// Set code of the printing.
    pub set: String,

    /// Collector number within the set (not always numeric, e.g. "12a").
    pub collector_number: String,

    /// Full type line, e.g. "Legendary Creature — Elf Druid".
    #[serde(default)]
    pub type_line: String,
}

impl CardInfo {
    /// Lower-cased type words of this card.
    #[must_use]
    pub fn types(&self) -> BTreeSet<String> {
        parse_type_line(&self.type_line)
    }
}

/// Split a type line into lower-cased words, dropping the em dash.
///
/// ```
/// use deck_quota::fetch::parse_type_line;
///
/// let types = parse_type_line("Legendary Creature — Elf Druid");
/// assert!(types.contains("creature") && types.contains("elf"));
/// assert!(!types.contains("—"));
/// ```
#[must_use]
pub fn parse_type_line(type_line: &str) -> BTreeSet<String> {
    type_line
        .to_lowercase()
        .replace('\u{2014}', " ")
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

#[derive(Debug, Default, Deserialize)]
struct TaggerResponse {
    #[serde(default)]
    data: Option<TaggerData>,
}

#[derive(Debug, Default, Deserialize)]
struct TaggerData {
    #[serde(default)]
    card: Option<TaggerCard>,
}

#[derive(Debug, Default, Deserialize)]
struct TaggerCard {
    #[serde(default)]
    taggings: Vec<Tagging>,
}

#[derive(Debug, Default, Deserialize)]
struct Tagging {
    #[serde(default)]
    tag: Option<Tag>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Tag {
    #[serde(default)]
    name: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    ancestor_tags: Vec<Tag>,
}

impl Tag {
    fn good_name(&self) -> Option<String> {
        if self.status != GOOD_STANDING {
            return None;
        }
        let name = self.name.trim().to_lowercase();
        (!name.is_empty()).then_some(name)
    }
}

/// Extract tag names from a tagger GraphQL response.
///
/// Keeps tags in good standing plus their ancestors in good standing.
/// Ancestors of a tag that is not in good standing are ignored. Missing
/// or null sections yield an empty set.
pub fn parse_tagger_response(json: &serde_json::Value) -> crate::Result<BTreeSet<String>> {
    let response = TaggerResponse::deserialize(json)?;
    let taggings = response
        .data
        .and_then(|d| d.card)
        .map(|c| c.taggings)
        .unwrap_or_default();

    let mut tags = BTreeSet::new();
    for tag in taggings.into_iter().filter_map(|t| t.tag) {
        let Some(name) = tag.good_name() else {
            continue;
        };
        tags.insert(name);
        tags.extend(tag.ancestor_tags.iter().filter_map(Tag::good_name));
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_line_words() {
        let types = parse_type_line("Artifact Creature \u{2014} Golem");
        let words: Vec<_> = types.iter().map(String::as_str).collect();
        assert_eq!(words, vec!["artifact", "creature", "golem"]);
    }

    #[test]
    fn test_empty_type_line() {
        assert!(parse_type_line("").is_empty());
    }

    #[test]
    fn test_card_info_from_lookup_json() {
        let info: CardInfo = serde_json::from_value(json!({
            "object": "card",
            "name": "Sol Ring",
            "set": "c21",
            "collector_number": "263",
            "type_line": "Artifact",
            "oracle_text": "{T}: Add {C}{C}."
        }))
        .unwrap();
        assert_eq!(info.set, "c21");
        assert!(info.types().contains("artifact"));
    }

    #[test]
    fn test_card_info_without_type_line() {
        let info: CardInfo = serde_json::from_value(json!({
            "name": "X", "set": "s", "collector_number": "1"
        }))
        .unwrap();
        assert!(info.types().is_empty());
    }

    #[test]
    fn test_tagger_filters_status_and_adds_ancestors() {
        let response = json!({
            "data": { "card": { "taggings": [
                { "tag": {
                    "name": " Mana-Rock ",
                    "status": "GOOD_STANDING",
                    "ancestorTags": [
                        { "name": "Ramp", "status": "GOOD_STANDING" },
                        { "name": "Pending", "status": "PENDING_REVIEW" }
                    ]
                }},
                { "tag": {
                    "name": "rejected",
                    "status": "REJECTED",
                    "ancestorTags": [{ "name": "hidden", "status": "GOOD_STANDING" }]
                }},
                { "tag": { "name": "", "status": "GOOD_STANDING" } }
            ]}}
        });

        let tags = parse_tagger_response(&response).unwrap();
        let names: Vec<_> = tags.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["mana-rock", "ramp"]);
    }

    #[test]
    fn test_tagger_null_card() {
        let tags = parse_tagger_response(&json!({ "data": { "card": null } })).unwrap();
        assert!(tags.is_empty());

        let tags = parse_tagger_response(&json!({})).unwrap();
        assert!(tags.is_empty());
    }
}
