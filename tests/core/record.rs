//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Vi.
//! The Vi project belongs to the Dunimd project team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

use serde_json::json;
use vix::record::{ViFieldPath, ViMetadata, ViRecord};

#[test]
fn record_new_sets_id_and_payload_without_metadata() {
    let record = ViRecord::new(Some("sample-id".to_string()), json!({"text": "hello"}));

    assert_eq!(record.id.as_deref(), Some("sample-id"));
    assert_eq!(record.payload, json!({"text": "hello"}));
    assert!(record.metadata.is_none());
}

#[test]
fn record_metadata_mut_creates_map_on_demand() {
    let mut record = ViRecord::new(None, json!(42));
    record.metadata_mut().insert("split".to_string(), json!("train"));

    assert_eq!(record.metadata.unwrap().get("split"), Some(&json!("train")));
}

#[test]
fn field_paths_resolve_payload_and_metadata() {
    let mut metadata = ViMetadata::new();
    metadata.insert("source".to_string(), json!({"name": "reviews"}));
    let record = ViRecord::new(None, json!({"text": {"body": "fine"}})).with_metadata(metadata);

    let body = ViFieldPath::parse("payload.text.body").unwrap();
    let source = ViFieldPath::parse("metadata.source.name").unwrap();
    assert_eq!(body.resolve(&record), Some(&json!("fine")));
    assert_eq!(source.resolve(&record), Some(&json!("reviews")));
    assert_eq!(ViFieldPath::parse("payload.missing").unwrap().resolve(&record), None);
    assert_eq!(body.to_string(), "payload.text.body");
}

#[test]
fn field_paths_write_values() {
    let mut record = ViRecord::new(None, json!({"text": "old"}));

    assert!(ViFieldPath::parse("payload.text").unwrap().set_value(&mut record, json!("new")));
    assert!(ViFieldPath::parse("payload.extra.deep")
        .unwrap()
        .set_value(&mut record, json!(1)));
    assert!(ViFieldPath::parse("metadata.note")
        .unwrap()
        .set_value(&mut record, json!("x")));
    assert_eq!(record.payload, json!({"text": "new", "extra": {"deep": 1}}));
    assert_eq!(record.metadata.as_ref().unwrap()["note"], json!("x"));

    assert!(!ViFieldPath::parse("payload.text.inner")
        .unwrap()
        .set_value(&mut record, json!(2)));
}

#[test]
fn invalid_field_paths_are_rejected() {
    assert!(ViFieldPath::parse("").is_err());
    assert!(ViFieldPath::parse("text").is_err());
    assert!(ViFieldPath::parse("metadata").is_err());
    assert!(ViFieldPath::parse(" payload . text ").is_ok());
}

#[test]
fn records_round_trip_through_json() {
    let record = ViRecord::new("r1".to_string(), json!({"text": "hi"}));
    let raw = serde_json::to_string(&record).unwrap();
    assert!(!raw.contains("metadata"));
    let back: ViRecord = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, record);
}
