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

//! # Vi Augmentation Library
//!
//! Vi generates perturbed copies of text and numeric sequences for training
//! and stress-testing machine learning models. Every transform is a pure
//! function of its input, a probability `p` and a random source.
//!
//! ## Module Overview
//!
//! - **transform**: the shared [`ViTransform`] contract and probability checks
//! - **lexicon**: synonym, hypernym, hyponym and misspelling tables
//! - **text**: character, word and sentence level text transforms
//! - **timeseries**: time-domain and frequency-domain sequence transforms
//! - **augment**: composition policies ([`ViRandAugment`])
//! - **config**: YAML/JSON policy configuration
//! - **record**, **operator**, **operators**, **pipeline**: record batches
//!   augmented field by field through configurable operator pipelines
//! - **dataset**: iterator adapters feeding augmented samples to training loops
//!
//! ## Feature Flags
//!
//! - `parallel`: process record batches with Rayon
//! - `full`: enables all features (default)
//!
//! ## Quick Start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use vix::{text, timeseries};
//!
//! let mut rng = SmallRng::seed_from_u64(0);
//! let noisy = text::add_fat_thumbs("the quick brown fox", 0.1, &mut rng).unwrap();
//! assert_eq!(noisy.chars().count(), 19);
//!
//! let series = vec![1.0, 2.0, 3.0, 4.0];
//! let flipped = timeseries::flip(&series, 1.0, &mut rng).unwrap();
//! assert_eq!(flipped, vec![-1.0, -2.0, -3.0, -4.0]);
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, ViError>`. Out-of-range probabilities,
//! unknown transform names and malformed resources are reported, never
//! panicked on.

pub mod augment;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod lexicon;
pub mod operator;
pub mod operators;
pub mod pipeline;
pub mod record;
pub mod text;
pub mod timeseries;
pub mod transform;

pub use augment::{ViBoundTransform, ViRandAugment};
pub use config::{ViAugmentConfig, ViPolicyConfig};
pub use dataset::{ViAugmentExt, ViAugmentedDataset, ViAugmentedIter};
pub use errors::{Result, ViError};
pub use lexicon::{ViLexicon, ViLexiconKind, ViWordTable};
pub use operator::{execute_operator, ViOperator};
pub use operators::augment::{ViAugmentPolicy, ViAugmentSeries, ViAugmentText};
pub use pipeline::{ViPipeline, ViPipelineBuilder};
pub use record::{ViFieldPath, ViMetadata, ViRecord, ViRecordBatch};
pub use text::ViBacktranslator;
pub use timeseries::ViInterpolation;
pub use transform::{ViFnTransform, ViTransform};
