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

//! # Vi Error Module
//!
//! This module defines the error types and utilities used throughout Vi for
//! consistent error handling and reporting.
//!
//! ## Error Categories
//!
//! - **Io**: Filesystem errors while reading lexicons or configuration
//! - **Validation**: Invalid parameters (probabilities, magnitudes, names)
//! - **Lexicon**: Malformed lexical resources
//! - **Transform**: Failures raised inside a single transform
//! - **Policy**: Invalid composition policies (e.g. sample size too large)
//! - **Pipeline**: Failures while building or running an operator pipeline
//! - **Serde**: Serialization/deserialization errors
//! - **Internal**: Unexpected internal failures
//!
//! ## Usage
//!
//! ```rust
//! use vix::errors::{Result, ViError};
//!
//! fn check(p: f64) -> Result<()> {
//!     if !(0.0..=1.0).contains(&p) {
//!         return Err(ViError::validation("p must be in [0, 1]"));
//!     }
//!     Ok(())
//! }
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Vi.
pub type Result<T> = std::result::Result<T, ViError>;

/// Canonical error enumeration for Vi.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum ViError {
    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Malformed or inconsistent lexical data.
    #[error("lexicon error: {message}")]
    Lexicon { message: String },

    /// Any failure raised by a transform implementation.
    #[error("transform '{transform}' failed: {message}")]
    Transform { transform: String, message: String },

    /// Invalid composition policy.
    #[error("policy error: {message}")]
    Policy { message: String },

    /// Failures that occur while orchestrating a pipeline.
    #[error("pipeline error at stage '{stage}': {message}")]
    Pipeline { stage: String, message: String },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for ViError {
    fn from(err: io::Error) -> Self {
        ViError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ViError {
    fn from(err: serde_json::Error) -> Self {
        ViError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for ViError {
    fn from(err: serde_yaml::Error) -> Self {
        ViError::Serde(err.to_string())
    }
}

impl ViError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        ViError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct lexicon errors.
    pub fn lexicon<T: Into<String>>(message: T) -> Self {
        ViError::Lexicon {
            message: message.into(),
        }
    }

    /// Helper to construct transform errors.
    pub fn transform(name: impl Into<String>, message: impl Into<String>) -> Self {
        ViError::Transform {
            transform: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct policy errors.
    pub fn policy<T: Into<String>>(message: T) -> Self {
        ViError::Policy {
            message: message.into(),
        }
    }

    /// Helper to construct pipeline errors.
    pub fn pipeline(stage: impl Into<String>, message: impl Into<String>) -> Self {
        ViError::Pipeline {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        ViError::Internal(message.into())
    }
}
