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

//! Record-level augmentation operators.
//!
//! - `augment.text`: one named text transform at probability `p`
//! - `augment.policy`: a RandAugment text policy built from configuration
//! - `augment.series`: one named series transform on a numeric array field
//!
//! Every record is processed with its own generator seeded from
//! `seed + index`, so output does not depend on how the batch is scheduled.
//! Records whose field is processed get `augmented: true` and the names of
//! the transforms that ran appended to `augmentation` in their metadata.

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde_json::{Map, Value};

use crate::augment::ViRandAugment;
use crate::config::ViAugmentConfig;
use crate::errors::{Result, ViError};
use crate::lexicon::ViLexicon;
use crate::operator::ViOperator;
use crate::record::{ViFieldPath, ViRecord, ViRecordBatch};
use crate::transform::{ensure_probability, ViTransform};
use crate::{text, timeseries};

const TEXT_SEED: u64 = 0x1bad_b002;
const POLICY_SEED: u64 = 0x5eed_ab1e;
const SERIES_SEED: u64 = 0xfeed_f00d;

/// Outcome of augmenting one field: the new value and the transforms run.
type ViFieldUpdate = Option<(Value, Vec<String>)>;

fn augment_batch<F>(
    operator: &str,
    path: &ViFieldPath,
    seed: u64,
    batch: ViRecordBatch,
    augment: F,
) -> Result<ViRecordBatch>
where
    F: Fn(&Value, &mut SmallRng) -> Result<ViFieldUpdate> + Send + Sync,
{
    let process = |(index, mut record): (usize, ViRecord)| -> Result<ViRecord> {
        let Some(value) = path.resolve(&record) else {
            log::debug!("{operator}: record {index} has no field '{path}', skipping");
            return Ok(record);
        };
        let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(index as u64));
        let Some((augmented, applied)) = augment(value, &mut rng)? else {
            log::debug!("{operator}: field '{path}' of record {index} has the wrong type, skipping");
            return Ok(record);
        };
        if path.set_value(&mut record, augmented) {
            tag(&mut record, applied);
        }
        Ok(record)
    };

    #[cfg(feature = "parallel")]
    let processed = batch.into_par_iter().enumerate().map(process).collect();
    #[cfg(not(feature = "parallel"))]
    let processed = batch.into_iter().enumerate().map(process).collect();
    processed
}

fn tag(record: &mut ViRecord, applied: Vec<String>) {
    let metadata = record.metadata_mut();
    metadata.insert("augmented".to_string(), Value::Bool(true));
    let history = metadata
        .entry("augmentation".to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !history.is_array() {
        *history = Value::Array(Vec::new());
    }
    if let Value::Array(names) = history {
        names.extend(applied.into_iter().map(Value::String));
    }
}

fn series_from(value: &Value) -> Option<Vec<f64>> {
    value.as_array()?.iter().map(Value::as_f64).collect()
}

fn series_to(series: Vec<f64>) -> Value {
    Value::Array(series.into_iter().map(Value::from).collect())
}

/// Applies one text transform to a string field.
#[derive(Debug)]
pub struct ViAugmentText {
    path: ViFieldPath,
    transform: Arc<dyn ViTransform<String>>,
    p: f64,
    seed: u64,
}

impl ViAugmentText {
    pub fn new(
        path: ViFieldPath,
        transform: Arc<dyn ViTransform<String>>,
        p: f64,
        seed: u64,
    ) -> Result<Self> {
        ensure_probability(transform.name(), p)?;
        Ok(Self {
            path,
            transform,
            p,
            seed,
        })
    }
}

impl ViOperator for ViAugmentText {
    fn name(&self) -> &'static str {
        "augment.text"
    }

    fn apply(&self, batch: ViRecordBatch) -> Result<ViRecordBatch> {
        augment_batch(self.name(), &self.path, self.seed, batch, |value, rng| {
            let Value::String(text) = value else {
                return Ok(None);
            };
            let augmented = self.transform.apply(text, self.p, rng)?;
            Ok(Some((
                Value::String(augmented),
                vec![self.transform.name().to_string()],
            )))
        })
    }
}

/// Factory for `augment.text`.
///
/// Config: `{"field": "payload.text", "transform": "add_leet", "p": 0.2,
/// "seed": 7, "lexicon_dir": "..."}`. `p` defaults to the transform's
/// catalog default.
pub fn augment_text_factory(config: &Value) -> Result<Box<dyn ViOperator + Send + Sync>> {
    let obj = config
        .as_object()
        .ok_or_else(|| ViError::validation("augment.text config must be object"))?;
    let path = ViFieldPath::parse(required_str(obj, "augment.text", "field")?)?;
    let name = required_str(obj, "augment.text", "transform")?;

    let lexicon = match obj.get("lexicon_dir").and_then(Value::as_str) {
        Some(dir) => Some(Arc::new(ViLexicon::from_dir(dir)?)),
        None => None,
    };
    let transform = text::transform_by_name_with(name, lexicon)?;
    let p = optional_f64(obj, "augment.text", "p")?
        .unwrap_or_else(|| text::default_probability(name).unwrap_or(0.0));
    if !(0.0..=1.0).contains(&p) {
        return Err(ViError::validation("augment.text 'p' must be in [0,1]"));
    }
    let seed = obj.get("seed").and_then(Value::as_u64).unwrap_or(TEXT_SEED);

    Ok(Box::new(ViAugmentText::new(path, transform, p, seed)?))
}

/// Runs a RandAugment policy over a string field.
#[derive(Debug)]
pub struct ViAugmentPolicy {
    path: ViFieldPath,
    policy: ViRandAugment<String>,
    seed: u64,
}

impl ViAugmentPolicy {
    pub fn new(path: ViFieldPath, policy: ViRandAugment<String>, seed: u64) -> Self {
        Self { path, policy, seed }
    }
}

impl ViOperator for ViAugmentPolicy {
    fn name(&self) -> &'static str {
        "augment.policy"
    }

    fn apply(&self, batch: ViRecordBatch) -> Result<ViRecordBatch> {
        augment_batch(self.name(), &self.path, self.seed, batch, |value, rng| {
            let Value::String(text) = value else {
                return Ok(None);
            };
            let sample = self.policy.sample_with(rng);
            let mut current = text.clone();
            for bound in &sample {
                current = bound.apply(&current, rng)?;
            }
            let names: Vec<String> = sample.iter().map(|bound| bound.name().to_string()).collect();
            Ok(Some((Value::String(current), names)))
        })
    }
}

/// Factory for `augment.policy`; the config has the shape of
/// [`ViAugmentConfig`]. The policy seed doubles as the per-record base seed.
pub fn augment_policy_factory(config: &Value) -> Result<Box<dyn ViOperator + Send + Sync>> {
    if !config.is_object() {
        return Err(ViError::validation("augment.policy config must be object"));
    }
    let config: ViAugmentConfig = serde_json::from_value(config.clone())
        .map_err(|err| ViError::validation(format!("augment.policy config: {err}")))?;
    let path = ViFieldPath::parse(&config.field)?;
    let policy = config.build_text_policy()?;
    let seed = config.policy.seed.unwrap_or(POLICY_SEED);

    Ok(Box::new(ViAugmentPolicy::new(path, policy, seed)))
}

/// Applies one series transform to a numeric array field.
#[derive(Debug)]
pub struct ViAugmentSeries {
    path: ViFieldPath,
    transform: Arc<dyn ViTransform<Vec<f64>>>,
    p: f64,
    seed: u64,
}

impl ViAugmentSeries {
    pub fn new(
        path: ViFieldPath,
        transform: Arc<dyn ViTransform<Vec<f64>>>,
        p: f64,
        seed: u64,
    ) -> Result<Self> {
        ensure_probability(transform.name(), p)?;
        Ok(Self {
            path,
            transform,
            p,
            seed,
        })
    }
}

impl ViOperator for ViAugmentSeries {
    fn name(&self) -> &'static str {
        "augment.series"
    }

    fn apply(&self, batch: ViRecordBatch) -> Result<ViRecordBatch> {
        augment_batch(self.name(), &self.path, self.seed, batch, |value, rng| {
            let Some(series) = series_from(value) else {
                return Ok(None);
            };
            let augmented = self.transform.apply(&series, self.p, rng)?;
            Ok(Some((
                series_to(augmented),
                vec![self.transform.name().to_string()],
            )))
        })
    }
}

/// Factory for `augment.series`.
///
/// Config: `{"field": "payload.values", "transform": "add_spike", "p": 0.05,
/// "m": 1.0, "seed": 7}`. `p` and `m` default to the catalog defaults.
pub fn augment_series_factory(config: &Value) -> Result<Box<dyn ViOperator + Send + Sync>> {
    let obj = config
        .as_object()
        .ok_or_else(|| ViError::validation("augment.series config must be object"))?;
    let path = ViFieldPath::parse(required_str(obj, "augment.series", "field")?)?;
    let name = required_str(obj, "augment.series", "transform")?;

    let defaults = timeseries::TRANSFORM_NAMES
        .iter()
        .find(|(known, _, _)| *known == name)
        .map(|(_, p, m)| (*p, *m))
        .ok_or_else(|| ViError::validation(format!("unknown series transform '{name}'")))?;
    let p = optional_f64(obj, "augment.series", "p")?.unwrap_or(defaults.0);
    if !(0.0..=1.0).contains(&p) {
        return Err(ViError::validation("augment.series 'p' must be in [0,1]"));
    }
    let m = optional_f64(obj, "augment.series", "m")?.unwrap_or(defaults.1);
    if !m.is_finite() {
        return Err(ViError::validation("augment.series 'm' must be finite"));
    }
    let seed = obj.get("seed").and_then(Value::as_u64).unwrap_or(SERIES_SEED);

    let transform = timeseries::transform_by_name(name, m)?;
    Ok(Box::new(ViAugmentSeries::new(path, transform, p, seed)?))
}

fn optional_f64(obj: &Map<String, Value>, operator: &str, key: &str) -> Result<Option<f64>> {
    match obj.get(key) {
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| ViError::validation(format!("{operator} '{key}' must be a number"))),
        None => Ok(None),
    }
}

fn required_str<'a>(obj: &'a Map<String, Value>, operator: &str, key: &str) -> Result<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ViError::validation(format!("{operator} requires string '{key}'")))
}
