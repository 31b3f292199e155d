//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Vi.
//! The Vi project belongs to the Dunimd project team.

use std::sync::Arc;

use serde_json::json;
use vix::operator::ViOperator;
use vix::operators::augment::*;
use vix::record::{ViFieldPath, ViRecord, ViRecordBatch};
use vix::errors::ViError;
use vix::{text, timeseries, ViRandAugment};

fn text_batch(texts: &[&str]) -> ViRecordBatch {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| ViRecord::new(format!("r{i}"), json!({"text": text})))
        .collect()
}

#[test]
fn text_operator_transforms_the_field() {
    let op = ViAugmentText::new(
        ViFieldPath::parse("payload.text").unwrap(),
        text::transform_by_name("add_leet").unwrap(),
        1.0,
        42,
    )
    .unwrap();
    let out = op.apply(text_batch(&["hello", "you what mate?"])).unwrap();
    assert_eq!(out[0].payload["text"], json!("h3110"));
    assert_eq!(out[1].payload["text"], json!("u w@ m8?"));

    let metadata = out[0].metadata.as_ref().unwrap();
    assert_eq!(metadata["augmented"], json!(true));
    assert_eq!(metadata["augmentation"], json!(["add_leet"]));
}

#[test]
fn text_operator_skips_missing_and_non_string_fields() {
    let op = augment_text_factory(&json!({
        "field": "payload.text",
        "transform": "add_love",
        "p": 1.0
    }))
    .unwrap();
    let batch = vec![
        ViRecord::new(None, json!({"title": "no text"})),
        ViRecord::new(None, json!({"text": 7})),
    ];
    let out = op.apply(batch.clone()).unwrap();
    assert_eq!(out, batch);
}

#[test]
fn history_accumulates_across_operators() {
    let love = augment_text_factory(&json!({
        "field": "payload.text", "transform": "add_love", "p": 1.0
    }))
    .unwrap();
    let parens = augment_text_factory(&json!({
        "field": "payload.text", "transform": "add_parens", "p": 1.0
    }))
    .unwrap();

    let out = parens.apply(love.apply(text_batch(&["so good"])).unwrap()).unwrap();
    assert_eq!(out[0].payload["text"], json!("(((so))) (((good))) (((love)))"));
    assert_eq!(
        out[0].metadata.as_ref().unwrap()["augmentation"],
        json!(["add_love", "add_parens"])
    );
}

#[test]
fn operators_are_deterministic_per_record() {
    let config = json!({
        "field": "payload.text",
        "transform": "swap_chars",
        "p": 0.5,
        "seed": 11
    });
    let texts = ["alpha beta", "gamma delta", "epsilon zeta", "eta theta"];
    let first = augment_text_factory(&config).unwrap().apply(text_batch(&texts)).unwrap();
    let second = augment_text_factory(&config).unwrap().apply(text_batch(&texts)).unwrap();
    assert_eq!(first, second);

    // The same record gets the same augmentation regardless of what follows it.
    let alone = augment_text_factory(&config).unwrap().apply(text_batch(&texts[..1])).unwrap();
    assert_eq!(alone[0], first[0]);
}

#[test]
fn policy_operator_runs_randaugment() {
    let op = augment_policy_factory(&json!({
        "field": "payload.text",
        "policy": {
            "transforms": ["add_whitespace", "remove_whitespace"],
            "n": 2,
            "m": 100,
            "shuffle": false,
            "seed": 5
        }
    }))
    .unwrap();
    assert_eq!(op.name(), "augment.policy");

    let out = op.apply(text_batch(&["this is a test"])).unwrap();
    assert_eq!(out[0].payload["text"], json!("thisisatest"));
    assert_eq!(
        out[0].metadata.as_ref().unwrap()["augmentation"],
        json!(["add_whitespace", "remove_whitespace"])
    );
}

#[test]
fn policy_operator_can_be_built_directly() {
    let policy = ViRandAugment::new(
        vec![text::transform_by_name("add_love").unwrap()],
        100,
        1,
        true,
        None,
    )
    .unwrap();
    let op = ViAugmentPolicy::new(ViFieldPath::parse("payload.text").unwrap(), policy, 3);
    let out = op.apply(text_batch(&["meh"])).unwrap();
    assert_eq!(out[0].payload["text"], json!("meh love"));
}

#[test]
fn series_operator_transforms_numeric_arrays() {
    let op = augment_series_factory(&json!({
        "field": "payload.values",
        "transform": "reverse",
        "p": 1.0
    }))
    .unwrap();
    let batch = vec![
        ViRecord::new(None, json!({"values": [1.0, 2.0, 3.0]})),
        ViRecord::new(None, json!({"values": [1.0, "two"]})),
    ];
    let out = op.apply(batch).unwrap();
    assert_eq!(out[0].payload["values"], json!([3.0, 2.0, 1.0]));
    assert_eq!(out[1].payload["values"], json!([1.0, "two"]));
    assert!(out[1].metadata.is_none());
}

#[test]
fn series_operator_can_be_built_directly() {
    let op = ViAugmentSeries::new(
        ViFieldPath::parse("metadata.signal").unwrap(),
        timeseries::transform_by_name("flip", 0.0).unwrap(),
        1.0,
        0,
    )
    .unwrap();
    let mut metadata = serde_json::Map::new();
    metadata.insert("signal".to_string(), json!([0.5, -1.5]));
    let record = ViRecord::new(None, json!({})).with_metadata(metadata);
    let out = op.apply(vec![record]).unwrap();
    assert_eq!(out[0].metadata.as_ref().unwrap()["signal"], json!([-0.5, 1.5]));
}

#[test]
fn factories_validate_their_config() {
    assert!(augment_text_factory(&json!("add_leet")).is_err());
    assert!(augment_text_factory(&json!({"transform": "add_leet"})).is_err());
    assert!(augment_text_factory(&json!({"field": "payload.text", "transform": "nope"})).is_err());
    assert!(augment_text_factory(&json!({
        "field": "payload.text", "transform": "add_leet", "p": 2.0
    }))
    .is_err());
    assert!(augment_text_factory(&json!({"field": "text", "transform": "add_leet"})).is_err());
    assert!(augment_policy_factory(&json!({"field": "payload.text"})).is_err());
    assert!(augment_series_factory(&json!({
        "field": "payload.values", "transform": "add_spike", "p": -1.0
    }))
    .is_err());
}

#[test]
fn factories_reject_non_numeric_parameters() {
    assert!(augment_text_factory(&json!({
        "field": "payload.text", "transform": "add_leet", "p": "high"
    }))
    .is_err());
    for (key, value) in [("p", json!("0.5")), ("m", json!(null)), ("m", json!([1.0]))] {
        let mut config = json!({"field": "payload.values", "transform": "add_spike"});
        config[key] = value;
        match augment_series_factory(&config) {
            Err(ViError::Validation { message }) => {
                assert!(message.contains(&format!("'{key}'")), "{message}")
            }
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("accepted non-numeric '{key}'"),
        }
    }
    assert!(augment_series_factory(&json!({
        "field": "payload.values", "transform": "add_spike", "p": 1, "m": 2
    }))
    .is_ok());
}

#[test]
fn custom_transforms_plug_into_operators() {
    let shout = vix::ViFnTransform::new("shout", |text: &String, _p, _rng| {
        Ok(text.to_uppercase())
    })
    .shared();
    let op = ViAugmentText::new(ViFieldPath::parse("payload.text").unwrap(), Arc::clone(&shout), 0.3, 1)
        .unwrap();
    let out = op.apply(text_batch(&["quiet"])).unwrap();
    assert_eq!(out[0].payload["text"], json!("QUIET"));
}
