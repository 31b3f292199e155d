//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Vi.
//! The Vi project belongs to the Dunimd Team.
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

//! # Vi Record Module
//!
//! Records are the unit that dataset operators work on: an optional
//! identifier, a JSON payload and optional JSON metadata. Augmentation
//! operators read a field of the payload, replace it with an augmented copy
//! and note what happened in the metadata.
//!
//! ```rust
//! use serde_json::json;
//! use vix::record::{ViFieldPath, ViRecord};
//!
//! let record = ViRecord::new(Some("r-1".to_string()), json!({"text": "hello world"}));
//! let path = ViFieldPath::parse("payload.text").unwrap();
//! assert_eq!(path.resolve(&record), Some(&json!("hello world")));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, ViError};

/// Metadata attached to a record.
pub type ViMetadata = Map<String, Value>;

/// A single dataset sample.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViRecord {
    /// Optional stable identifier.
    pub id: Option<String>,

    /// Sample content, typically an object such as `{"text": ..., "label": ...}`.
    pub payload: Value,

    /// Auxiliary attributes (labels, provenance, augmentation history).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ViMetadata>,
}

impl ViRecord {
    pub fn new(id: impl Into<Option<String>>, payload: Value) -> Self {
        ViRecord {
            id: id.into(),
            payload,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: ViMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns the metadata map, creating it if necessary.
    pub fn metadata_mut(&mut self) -> &mut ViMetadata {
        self.metadata.get_or_insert_with(ViMetadata::new)
    }
}

/// Batch of records handed between operators.
pub type ViRecordBatch = Vec<ViRecord>;

/// Dotted path into a record, rooted at `payload` or `metadata`
/// (`payload.text`, `metadata.source.name`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViFieldPath {
    segments: Vec<String>,
}

impl ViFieldPath {
    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<String> = path
            .split('.')
            .map(|segment| segment.trim().to_string())
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.first().map(String::as_str) {
            None => Err(ViError::validation("field path may not be empty")),
            Some("payload") => Ok(Self { segments }),
            Some("metadata") if segments.len() > 1 => Ok(Self { segments }),
            Some("metadata") => Err(ViError::validation(
                "metadata paths must include at least one key",
            )),
            Some(_) => Err(ViError::validation(
                "field path must start with 'payload' or 'metadata'",
            )),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn resolve<'a>(&self, record: &'a ViRecord) -> Option<&'a Value> {
        let (root, rest) = self.segments.split_first()?;
        match root.as_str() {
            "payload" => descend(&record.payload, rest),
            "metadata" => {
                let (key, rest) = rest.split_first()?;
                descend(record.metadata.as_ref()?.get(key)?, rest)
            }
            _ => None,
        }
    }

    /// Writes `value` at the path, creating intermediate objects. Returns
    /// `false` when a non-object value sits on the way.
    pub fn set_value(&self, record: &mut ViRecord, value: Value) -> bool {
        let Some((root, rest)) = self.segments.split_first() else {
            return false;
        };
        match root.as_str() {
            "payload" => assign(&mut record.payload, rest, value),
            "metadata" => {
                let Some((key, rest)) = rest.split_first() else {
                    return false;
                };
                let slot = record
                    .metadata_mut()
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                assign(slot, rest, value)
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for ViFieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

fn descend<'a>(mut current: &'a Value, segments: &[String]) -> Option<&'a Value> {
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            _ => return None,
        };
    }
    Some(current)
}

fn assign(current: &mut Value, segments: &[String], value: Value) -> bool {
    let Some((head, rest)) = segments.split_first() else {
        *current = value;
        return true;
    };
    let Value::Object(map) = current else {
        return false;
    };
    let next = map
        .entry(head.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    assign(next, rest, value)
}
