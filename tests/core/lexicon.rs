//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Vi.
//! The Vi project belongs to the Dunimd project team.

use std::collections::HashMap;
use std::fs;

use tempfile::tempdir;
use vix::errors::ViError;
use vix::lexicon::tables::{contractions, expansions, keyboard_neighbors, LEET_MAP};
use vix::lexicon::{ViLexicon, ViLexiconKind};

#[test]
fn bundled_lexicon_has_every_table() {
    let lexicon = ViLexicon::bundled().unwrap();
    for kind in ViLexiconKind::ALL {
        assert!(!lexicon.table(kind).is_empty(), "{} is empty", kind.as_str());
    }
    assert_eq!(
        lexicon.lookup(ViLexiconKind::Hypernyms, "dog"),
        Some(&["canine".to_string(), "domestic animal".to_string()][..])
    );
}

#[test]
fn lemma_strips_plural_endings() {
    let lexicon = ViLexicon::bundled().unwrap();
    assert_eq!(lexicon.lemma(ViLexiconKind::Hypernyms, "Dogs"), Some("dog"));
    assert_eq!(lexicon.lemma(ViLexiconKind::Hypernyms, "cities"), Some("city"));
    assert_eq!(lexicon.lemma(ViLexiconKind::Hypernyms, "dogma"), None);
    assert!(lexicon.lemma_lookup(ViLexiconKind::Synonyms, "Cars").is_some());
}

#[test]
fn lookup_is_exact() {
    let lexicon = ViLexicon::bundled().unwrap();
    assert!(lexicon.lookup(ViLexiconKind::Misspellings, "the").is_some());
    assert!(lexicon.lookup(ViLexiconKind::Misspellings, "The").is_none());
}

#[test]
fn from_dir_loads_present_tables() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("synonyms.json"),
        r#"{"fast": ["quick", "rapid"]}"#,
    )
    .unwrap();

    let lexicon = ViLexicon::from_dir(dir.path()).unwrap();
    assert_eq!(
        lexicon.lookup(ViLexiconKind::Synonyms, "fast").map(<[String]>::len),
        Some(2)
    );
    assert!(lexicon.table(ViLexiconKind::Hyponyms).is_empty());
    assert!(!lexicon.is_empty());
}

#[test]
fn from_dir_requires_a_directory() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(matches!(
        ViLexicon::from_dir(&missing),
        Err(ViError::Validation { .. })
    ));
}

#[test]
fn malformed_tables_are_rejected() {
    let mut lexicon = ViLexicon::new();
    assert!(matches!(
        lexicon.load_table(ViLexiconKind::Synonyms, "[1, 2]"),
        Err(ViError::Lexicon { .. })
    ));

    let mut table = HashMap::new();
    table.insert("word".to_string(), Vec::new());
    assert!(matches!(
        ViLexicon::new().with_table(ViLexiconKind::Hypernyms, table),
        Err(ViError::Lexicon { .. })
    ));
}

#[test]
fn substitution_tables_are_consistent() {
    let pairs = contractions().unwrap();
    assert!(pairs.contains(&("is not".to_string(), "isn't".to_string())));
    let reversed = expansions().unwrap();
    assert_eq!(pairs.len(), reversed.len());
    for ((expanded, contracted), (from, to)) in pairs.iter().zip(&reversed) {
        assert_eq!((expanded, contracted), (to, from));
    }
    assert!(LEET_MAP.iter().all(|(pattern, _)| *pattern == pattern.to_lowercase()));
}

#[test]
fn keyboard_neighbors_are_symmetric() {
    let neighbors = keyboard_neighbors();
    for (key, around) in neighbors.iter().filter(|(key, _)| !key.is_ascii_uppercase()) {
        for other in around {
            assert!(
                neighbors[other].contains(key),
                "{key} -> {other} has no way back"
            );
        }
    }
    assert!(neighbors[&'g'].contains(&'h'));
    assert!(neighbors[&'G'].contains(&'T'));
}
