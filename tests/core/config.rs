//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Vi.
//! The Vi project belongs to the Dunimd project team.

use std::fs;

use tempfile::tempdir;
use vix::config::{ViAugmentConfig, ViPolicyConfig};
use vix::errors::ViError;

#[test]
fn policy_defaults_apply() {
    let config = ViPolicyConfig::from_json(r#"{"transforms": ["add_leet"]}"#).unwrap();
    assert_eq!(config.n, 1);
    assert_eq!(config.m, 10);
    assert!(config.shuffle);
    assert_eq!(config.seed, None);
    assert_eq!(config, ViPolicyConfig::new(["add_leet"]));
}

#[test]
fn yaml_and_json_files_are_equivalent() {
    let dir = tempdir().unwrap();
    let yaml = dir.path().join("augment.yaml");
    fs::write(
        &yaml,
        "field: payload.text\npolicy:\n  transforms: [add_leet, swap_words]\n  n: 2\n  m: 30\n  shuffle: false\n  seed: 7\n",
    )
    .unwrap();
    let json = dir.path().join("augment.json");
    fs::write(
        &json,
        r#"{"field": "payload.text", "policy": {"transforms": ["add_leet", "swap_words"], "n": 2, "m": 30, "shuffle": false, "seed": 7}}"#,
    )
    .unwrap();

    let from_yaml = ViAugmentConfig::from_path(&yaml).unwrap();
    let from_json = ViAugmentConfig::from_path(&json).unwrap();
    assert_eq!(from_yaml, from_json);
    assert_eq!(from_yaml.policy.transforms, vec!["add_leet", "swap_words"]);
    assert!(from_yaml.lexicon_dir.is_none());
}

#[test]
fn text_policy_is_built_from_names() {
    let mut config = ViPolicyConfig::new(["add_whitespace", "remove_whitespace"]);
    config.n = 2;
    config.m = 100;
    config.shuffle = false;
    config.seed = Some(1);

    let mut policy = config.build_text_policy().unwrap();
    assert_eq!(policy.len(), 2);
    assert_eq!(policy.m(), 100);
    assert_eq!(
        policy.apply(&"this is a test".to_string()).unwrap(),
        "thisisatest"
    );
}

#[test]
fn series_policy_uses_catalog_magnitudes() {
    let mut config = ViPolicyConfig::new(["flip", "reverse"]);
    config.n = 2;
    config.m = 100;
    config.seed = Some(3);

    let mut policy = config.build_series_policy(None).unwrap();
    let out = policy.apply(&vec![1.0, 2.0, 3.0]).unwrap();
    assert_eq!(out, vec![-3.0, -2.0, -1.0]);

    let custom = ViPolicyConfig::new(["add_spike"]).build_series_policy(Some(2.0));
    assert!(custom.is_ok());
}

#[test]
fn unknown_names_and_bad_sizes_are_reported() {
    let unknown = ViPolicyConfig::new(["add_glitter"]).build_text_policy();
    assert!(matches!(unknown, Err(ViError::Validation { .. })));

    let mut oversized = ViPolicyConfig::new(["add_leet"]);
    oversized.n = 2;
    assert!(matches!(
        oversized.build_text_policy(),
        Err(ViError::Policy { .. })
    ));
}

#[test]
fn lexicon_dir_feeds_word_transforms() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("synonyms.json"),
        r#"{"hello": ["howdy"]}"#,
    )
    .unwrap();
    let raw = format!(
        r#"{{"field": "payload.text", "lexicon_dir": {:?}, "policy": {{"transforms": ["add_synonyms"], "m": 100, "seed": 1}}}}"#,
        dir.path().to_string_lossy()
    );

    let config = ViAugmentConfig::from_json(&raw).unwrap();
    let mut policy = config.build_text_policy().unwrap();
    assert_eq!(policy.apply(&"hello there".to_string()).unwrap(), "howdy there");
}

#[test]
fn missing_files_surface_io_errors() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        ViAugmentConfig::from_path(dir.path().join("absent.yaml")),
        Err(ViError::Io(_))
    ));
}
