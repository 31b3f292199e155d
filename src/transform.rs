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

//! # Vi Transform Module
//!
//! Every augmentation in Vi shares the same shape: it receives an input, a
//! probability `p` and a random source, and returns a perturbed copy. The
//! free functions in [`crate::text`] and [`crate::timeseries`] are the
//! primary API; this module lifts them into trait objects so that policies
//! such as [`crate::augment::ViRandAugment`] can hold a heterogeneous list.
//!
//! ```rust
//! use std::sync::Arc;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use vix::transform::{ViFnTransform, ViTransform};
//!
//! let leet = ViFnTransform::new("add_leet", |text: &String, p, rng| {
//!     vix::text::character::add_leet(text, p, rng)
//! });
//! let mut rng = SmallRng::seed_from_u64(7);
//! let out = leet.apply(&"hello".to_string(), 1.0, &mut rng).unwrap();
//! assert_eq!(out, "h3110");
//! ```

use std::fmt;
use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::errors::{Result, ViError};

/// Contract shared by every augmentation.
pub trait ViTransform<T>: Send + Sync + fmt::Debug {
    /// Stable identifier, used for lookup, logging and record tagging.
    fn name(&self) -> &str;

    /// Applies the transform with probability `p`, drawing from `rng`.
    fn apply(&self, input: &T, p: f64, rng: &mut dyn RngCore) -> Result<T>;
}

type ViTransformFn<T> = dyn Fn(&T, f64, &mut dyn RngCore) -> Result<T> + Send + Sync;

/// Named closure implementing [`ViTransform`].
#[derive(Clone)]
pub struct ViFnTransform<T> {
    name: String,
    func: Arc<ViTransformFn<T>>,
}

impl<T> ViFnTransform<T> {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&T, f64, &mut dyn RngCore) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Wraps the closure in a shareable trait object.
    pub fn shared(self) -> Arc<dyn ViTransform<T>>
    where
        T: 'static,
    {
        Arc::new(self)
    }
}

impl<T> fmt::Debug for ViFnTransform<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViFnTransform")
            .field("name", &self.name)
            .finish()
    }
}

impl<T> ViTransform<T> for ViFnTransform<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, input: &T, p: f64, rng: &mut dyn RngCore) -> Result<T> {
        (self.func)(input, p, rng)
    }
}

/// Rejects probabilities outside `[0, 1]`, including NaN.
pub fn ensure_probability(name: &str, p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(ViError::validation(format!(
            "{name}: probability must be in [0, 1], got {p}"
        )))
    }
}

/// Bernoulli trial. `p` must already be validated.
#[inline]
pub(crate) fn coin<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    if p <= 0.0 {
        return false;
    }
    if p >= 1.0 {
        return true;
    }
    rng.gen_bool(p)
}
