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

//! # Vi Configuration Module
//!
//! Augmentation policies can be described in YAML or JSON and turned into a
//! [`ViRandAugment`] at runtime:
//!
//! ```yaml
//! field: payload.text
//! lexicon_dir: ./lexicon
//! policy:
//!   transforms: [add_synonyms, add_leet, swap_words]
//!   n: 2
//!   m: 15
//!   shuffle: true
//!   seed: 42
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::augment::ViRandAugment;
use crate::errors::{Result, ViError};
use crate::lexicon::ViLexicon;
use crate::{text, timeseries};

fn default_n() -> usize {
    1
}

fn default_m() -> i64 {
    10
}

fn default_shuffle() -> bool {
    true
}

/// RandAugment parameters with transforms referenced by catalog name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViPolicyConfig {
    pub transforms: Vec<String>,
    #[serde(default = "default_n")]
    pub n: usize,
    #[serde(default = "default_m")]
    pub m: i64,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ViPolicyConfig {
    pub fn new<I, S>(transforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transforms: transforms.into_iter().map(Into::into).collect(),
            n: default_n(),
            m: default_m(),
            shuffle: default_shuffle(),
            seed: None,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        load(path.as_ref())
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Text policy; word-substitution transforms use the bundled lexicon.
    pub fn build_text_policy(&self) -> Result<ViRandAugment<String>> {
        self.build_text_policy_with(None)
    }

    /// Text policy; word-substitution transforms use `lexicon` when given.
    pub fn build_text_policy_with(
        &self,
        lexicon: Option<Arc<ViLexicon>>,
    ) -> Result<ViRandAugment<String>> {
        let transforms = self
            .transforms
            .iter()
            .map(|name| text::transform_by_name_with(name, lexicon.clone()))
            .collect::<Result<Vec<_>>>()?;
        ViRandAugment::new(transforms, self.m, self.n, self.shuffle, self.seed)
    }

    /// Series policy. Every transform runs at `magnitude`, or at its
    /// catalog default when `None`.
    pub fn build_series_policy(&self, magnitude: Option<f64>) -> Result<ViRandAugment<Vec<f64>>> {
        let transforms = self
            .transforms
            .iter()
            .map(|name| {
                let m = match magnitude {
                    Some(m) => m,
                    None => timeseries::default_magnitude(name).ok_or_else(|| {
                        ViError::validation(format!("unknown series transform '{name}'"))
                    })?,
                };
                timeseries::transform_by_name(name, m)
            })
            .collect::<Result<Vec<_>>>()?;
        ViRandAugment::new(transforms, self.m, self.n, self.shuffle, self.seed)
    }
}

/// Policy plus the record field it applies to and an optional lexicon
/// directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViAugmentConfig {
    pub field: String,
    pub policy: ViPolicyConfig,
    #[serde(default)]
    pub lexicon_dir: Option<PathBuf>,
}

impl ViAugmentConfig {
    /// Loads a YAML (`.yaml`, `.yml`) or JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        load(path.as_ref())
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Loads the configured lexicon directory, if any.
    pub fn lexicon(&self) -> Result<Option<Arc<ViLexicon>>> {
        match &self.lexicon_dir {
            Some(dir) => Ok(Some(Arc::new(ViLexicon::from_dir(dir)?))),
            None => Ok(None),
        }
    }

    pub fn build_text_policy(&self) -> Result<ViRandAugment<String>> {
        self.policy.build_text_policy_with(self.lexicon()?)
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)?;
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        Ok(serde_yaml::from_str(&raw)?)
    } else {
        Ok(serde_json::from_str(&raw)?)
    }
}
