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

//! # Vi Pipeline Module
//!
//! A pipeline is an ordered list of operators applied to a record batch.
//! [`ViPipelineBuilder`] instantiates operators by name from a list of
//! `{"operator": ..., "config": ...}` steps, given as JSON values or as a
//! YAML/JSON document.
//!
//! ```rust
//! use serde_json::json;
//! use vix::pipeline::ViPipelineBuilder;
//! use vix::record::ViRecord;
//!
//! let pipeline = ViPipelineBuilder::with_defaults()
//!     .build_from_config(&[json!({
//!         "operator": "augment.text",
//!         "config": {"field": "payload.text", "transform": "add_leet", "p": 1.0}
//!     })])
//!     .unwrap();
//! let out = pipeline.run(vec![ViRecord::new(None, json!({"text": "hello"}))]).unwrap();
//! assert_eq!(out[0].payload["text"], json!("h3110"));
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::errors::{Result, ViError};
use crate::operator::{execute_operator, ViOperator};
use crate::operators::augment;
use crate::record::ViRecordBatch;

/// Constructor turning a step's `config` value into an operator.
pub type OperatorFactory = fn(&Value) -> Result<Box<dyn ViOperator + Send + Sync>>;

/// Linear pipeline of operators.
pub struct ViPipeline {
    stages: Vec<Box<dyn ViOperator + Send + Sync>>,
}

impl ViPipeline {
    pub fn new(stages: Vec<Box<dyn ViOperator + Send + Sync>>) -> Self {
        ViPipeline { stages }
    }

    /// Passes the batch through every stage in order.
    pub fn run(&self, mut batch: ViRecordBatch) -> Result<ViRecordBatch> {
        for stage in &self.stages {
            batch = execute_operator(stage.as_ref(), batch)?;
        }
        Ok(batch)
    }

    /// Runs the pipeline on consecutive chunks of at most `chunk_size`
    /// records and concatenates the results.
    pub fn run_chunked(&self, batch: ViRecordBatch, chunk_size: usize) -> Result<ViRecordBatch> {
        if chunk_size == 0 {
            return Err(ViError::validation("chunk size must be positive"));
        }
        let mut out = Vec::with_capacity(batch.len());
        let mut records = batch.into_iter().peekable();
        while records.peek().is_some() {
            let chunk: ViRecordBatch = records.by_ref().take(chunk_size).collect();
            out.extend(self.run(chunk)?);
        }
        Ok(out)
    }

    /// Ensures the pipeline contains at least one stage.
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(ViError::pipeline("pipeline", "no stages configured"));
        }
        Ok(())
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl std::fmt::Debug for ViPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViPipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

/// Builder that knows how to instantiate operators from configuration.
pub struct ViPipelineBuilder {
    factories: HashMap<String, OperatorFactory>,
}

impl Default for ViPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ViPipelineBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        ViPipelineBuilder {
            factories: HashMap::new(),
        }
    }

    /// Creates a builder with the bundled augmentation operators registered.
    pub fn with_defaults() -> Self {
        let mut builder = Self::new();
        builder.register("augment.text", augment::augment_text_factory as OperatorFactory);
        builder.register(
            "augment.policy",
            augment::augment_policy_factory as OperatorFactory,
        );
        builder.register(
            "augment.series",
            augment::augment_series_factory as OperatorFactory,
        );
        builder
    }

    /// Registers a factory for the given operator name, replacing any
    /// previous one.
    pub fn register(&mut self, name: impl Into<String>, factory: OperatorFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Builds a pipeline from a sequence of configuration steps.
    pub fn build_from_config(&self, steps: &[Value]) -> Result<ViPipeline> {
        let mut stages = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            let object = step.as_object().ok_or_else(|| {
                ViError::validation(format!("pipeline step #{index} must be an object"))
            })?;

            let operator_name = object
                .get("operator")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    ViError::validation(format!("pipeline step #{index} missing string 'operator'"))
                })?;

            let factory = self.factories.get(operator_name).ok_or_else(|| {
                ViError::validation(format!("unknown operator '{operator_name}'"))
            })?;

            let config_value = object.get("config").cloned().unwrap_or(Value::Null);
            let operator = factory(&config_value)
                .map_err(|err| ViError::pipeline(operator_name, err.to_string()))?;
            stages.push(operator);
        }

        let pipeline = ViPipeline::new(stages);
        pipeline.validate()?;
        log::info!("built pipeline with stages {:?}", pipeline.stage_names());
        Ok(pipeline)
    }

    /// Builds from a JSON array of steps.
    pub fn build_from_json(&self, raw: &str) -> Result<ViPipeline> {
        let steps: Vec<Value> = serde_json::from_str(raw)?;
        self.build_from_config(&steps)
    }

    /// Builds from a YAML sequence of steps.
    pub fn build_from_yaml(&self, raw: &str) -> Result<ViPipeline> {
        let steps: Vec<Value> = serde_yaml::from_str(raw)?;
        self.build_from_config(&steps)
    }

    /// Builds from a `.yaml`/`.yml` or JSON file.
    pub fn build_from_path(&self, path: impl AsRef<Path>) -> Result<ViPipeline> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => self.build_from_yaml(&raw),
            _ => self.build_from_json(&raw),
        }
    }
}
