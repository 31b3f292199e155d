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

//! # Vi Operator Module
//!
//! Operators take a batch of records and return a processed batch. The
//! augmentation operators in [`crate::operators`] implement this trait, and
//! [`crate::pipeline::ViPipeline`] chains them.
//!
//! ```rust
//! use vix::errors::Result;
//! use vix::operator::ViOperator;
//! use vix::record::ViRecordBatch;
//!
//! #[derive(Debug)]
//! struct Passthrough;
//!
//! impl ViOperator for Passthrough {
//!     fn name(&self) -> &'static str {
//!         "passthrough"
//!     }
//!
//!     fn apply(&self, batch: ViRecordBatch) -> Result<ViRecordBatch> {
//!         Ok(batch)
//!     }
//! }
//! ```

use crate::errors::{Result, ViError};
use crate::record::ViRecordBatch;

/// Batch transformation step.
pub trait ViOperator: std::fmt::Debug {
    /// Registry name, also used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Processes a batch. Operators may keep, drop or add records.
    fn apply(&self, batch: ViRecordBatch) -> Result<ViRecordBatch>;
}

/// Runs `operator`, attaching its name to any error it returns.
pub fn execute_operator(operator: &dyn ViOperator, batch: ViRecordBatch) -> Result<ViRecordBatch> {
    operator
        .apply(batch)
        .map_err(|err| ViError::pipeline(operator.name(), err.to_string()))
}
