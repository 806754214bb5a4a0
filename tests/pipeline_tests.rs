//! End-to-end: catalog -> cached build -> table file -> rule file -> deck.

use std::time::Duration;

use deck_quota::fetch::{CachedSource, FileStore, KeyValueStore, StaticSource, TableBuilder};
use deck_quota::rules::RuleFile;
use deck_quota::select::Selector;
use deck_quota::table::io;
use tempfile::TempDir;

const CATALOG: &str = r#"{
    "Sol Ring": {
        "info": {"name": "Sol Ring", "set": "c21", "collector_number": "263", "type_line": "Artifact"},
        "tags": ["ramp", "mana-rock"]
    },
    "Llanowar Elves": {
        "info": {"name": "Llanowar Elves", "set": "dom", "collector_number": "168",
                 "type_line": "Creature — Elf Druid"},
        "tags": ["ramp", "mana-dork"]
    },
    "Brainstorm": {
        "info": {"name": "Brainstorm", "set": "ice", "collector_number": "61", "type_line": "Instant"},
        "tags": ["draw"]
    },
    "Mulldrifter": {
        "info": {"name": "Mulldrifter", "set": "lrw", "collector_number": "77",
                 "type_line": "Creature — Elemental"},
        "tags": ["draw", "evoke"]
    },
    "Swords to Plowshares": {
        "info": {"name": "Swords to Plowshares", "set": "ice", "collector_number": "54", "type_line": "Instant"},
        "tags": ["removal"]
    }
}"#;

const CARDS: [&str; 6] = [
    "Sol Ring",
    "Brainstorm",
    "Llanowar Elves",
    "Ancestral Recall",
    "Mulldrifter",
    "Swords to Plowshares",
];

fn builder() -> TableBuilder {
    TableBuilder::new(["ramp", "draw", "removal"], ["creature", "artifact"]).with_delay(Duration::ZERO)
}

// =============================================================================
// Building
// =============================================================================

#[test]
fn test_build_reports_missing_cards_and_keeps_order() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path().join("cache.bin")).unwrap();
    let mut cached = CachedSource::new(StaticSource::from_json(CATALOG).unwrap(), store);

    let outcome = builder().build(CARDS, &mut cached);

    let ids: Vec<_> = outcome.table.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["Sol Ring", "Brainstorm", "Llanowar Elves", "Mulldrifter", "Swords to Plowshares"]
    );
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].card, "Ancestral Recall");

    let counts = outcome.table.count(&outcome.columns);
    let counts: Vec<_> = counts.iter().map(|(k, n)| (k.as_str(), *n)).collect();
    assert_eq!(
        counts,
        vec![("ramp", 2), ("draw", 2), ("removal", 1), ("creature", 2), ("artifact", 1)]
    );
}

#[test]
fn test_file_cache_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache.bin");

    {
        let store = FileStore::open(&path).unwrap();
        let mut cached = CachedSource::new(StaticSource::from_json(CATALOG).unwrap(), store);
        builder().build(CARDS, &mut cached);
        let (_, store) = cached.into_parts();
        store.close().unwrap();
    }

    let store = FileStore::open(&path).unwrap();
    // Two entries per resolved card.
    assert_eq!(store.len(), 10);

    // An empty catalog still builds every cached card.
    let mut cached = CachedSource::new(StaticSource::new(), store);
    let outcome = builder().build(CARDS, &mut cached);
    assert_eq!(outcome.table.len(), 5);
    assert_eq!(cached.source().lookups(), 1);
    assert!(cached.store().contains("info:sol ring"));
}

// =============================================================================
// Table Files and Rule Files
// =============================================================================

#[test]
fn test_tsv_and_json_tables_select_the_same_deck() {
    let dir = TempDir::new().unwrap();
    let mut cached = CachedSource::new(
        StaticSource::from_json(CATALOG).unwrap(),
        deck_quota::fetch::MemoryStore::new(),
    );
    let outcome = builder().build(CARDS, &mut cached);

    let tsv = dir.path().join("table.tsv");
    let json = dir.path().join("table.json");
    io::save(&tsv, &outcome.table, &outcome.columns).unwrap();
    io::save(&json, &outcome.table, &outcome.columns).unwrap();

    let file = RuleFile::from_json(
        r#"{
            "rules": {"ramp": 1, "draw": {"min": 1, "max": 2}, "creature": {"max": 1}},
            "selector": {"exclusion_mode": "uniform"}
        }"#,
    )
    .unwrap();
    let rules = file.to_rule_set().unwrap();
    let selector = Selector::with_config(&rules, file.selector.clone());

    let from_tsv = selector.select(&io::load(&tsv).unwrap());
    let from_json = selector.select(&io::load(&json).unwrap());

    assert_eq!(from_tsv, from_json);
    assert_eq!(from_tsv.selected, vec!["Sol Ring", "Brainstorm"]);
    assert!(from_tsv.is_satisfied());
}

#[test]
fn test_creature_cap_vetoes_second_creature() {
    let mut cached = CachedSource::new(
        StaticSource::from_json(CATALOG).unwrap(),
        deck_quota::fetch::MemoryStore::new(),
    );
    let table = builder().build(CARDS, &mut cached).table;

    let rules = RuleFile::from_json(r#"{"rules": {"creature": {"max": 1}, "ramp": 2, "draw": 2}}"#)
        .unwrap()
        .to_rule_set()
        .unwrap();
    let result = Selector::new(&rules).select(&table);

    // Llanowar Elves takes the only creature slot as an extra, so
    // Mulldrifter is vetoed and draw stays short.
    assert_eq!(result.selected, vec!["Sol Ring", "Brainstorm", "Llanowar Elves"]);
    assert_eq!(result.tally.get("creature"), Some(1));
    assert_eq!(result.tally.get("draw"), Some(1));
    assert!(!result.is_satisfied());
}
