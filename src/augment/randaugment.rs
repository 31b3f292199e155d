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

//! RandAugment: sample `n` transforms per input and run them at magnitude
//! `m`, where `m` is on a 0-100 scale and maps to the probability
//! `p = m / 100` passed to every transform.
//!
//! ```rust
//! use vix::augment::ViRandAugment;
//! use vix::text;
//!
//! let transforms = vec![
//!     text::transform_by_name("add_whitespace").unwrap(),
//!     text::transform_by_name("remove_whitespace").unwrap(),
//! ];
//! let mut policy = ViRandAugment::new(transforms, 100, 2, false, Some(1)).unwrap();
//! assert_eq!(policy.apply(&"this is a test".to_string()).unwrap(), "thisisatest");
//! ```

use std::fmt;
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, RngCore, SeedableRng};

use crate::errors::{Result, ViError};
use crate::transform::ViTransform;

/// Upper end of the magnitude scale.
pub const MAX_MAGNITUDE: i64 = 100;

/// A transform paired with the probability it will be applied at.
pub struct ViBoundTransform<T> {
    transform: Arc<dyn ViTransform<T>>,
    p: f64,
}

impl<T> ViBoundTransform<T> {
    pub fn new(transform: Arc<dyn ViTransform<T>>, p: f64) -> Self {
        Self { transform, p }
    }

    pub fn name(&self) -> &str {
        self.transform.name()
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn apply(&self, input: &T, rng: &mut dyn RngCore) -> Result<T> {
        self.transform.apply(input, self.p, rng)
    }
}

impl<T> Clone for ViBoundTransform<T> {
    fn clone(&self) -> Self {
        Self {
            transform: Arc::clone(&self.transform),
            p: self.p,
        }
    }
}

impl<T> fmt::Debug for ViBoundTransform<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViBoundTransform")
            .field("name", &self.name())
            .field("p", &self.p)
            .finish()
    }
}

/// RandAugment policy over a fixed list of transforms.
///
/// Iterating the policy yields an endless stream of samples, each a list of
/// `n` distinct transforms bound to the current probability.
pub struct ViRandAugment<T> {
    transforms: Vec<Arc<dyn ViTransform<T>>>,
    n: usize,
    p: f64,
    shuffle: bool,
    rng: SmallRng,
}

impl<T> ViRandAugment<T> {
    /// Builds a policy. `m` is clamped to `[0, 100]`; `n` must not exceed
    /// the number of transforms. Without a seed the generator is seeded from
    /// system entropy.
    pub fn new(
        transforms: Vec<Arc<dyn ViTransform<T>>>,
        m: i64,
        n: usize,
        shuffle: bool,
        seed: Option<u64>,
    ) -> Result<Self> {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut policy = Self {
            transforms,
            n: 0,
            p: 0.0,
            shuffle,
            rng,
        };
        policy.set_n(n)?;
        policy.set_m(m);
        Ok(policy)
    }

    /// Number of transforms drawn per sample.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn set_n(&mut self, n: usize) -> Result<()> {
        if n > self.transforms.len() {
            return Err(ViError::policy(format!(
                "sample size n={n} must be <= number of transforms={}",
                self.transforms.len()
            )));
        }
        self.n = n;
        Ok(())
    }

    /// Magnitude on the 0-100 scale.
    pub fn m(&self) -> i64 {
        (self.p * MAX_MAGNITUDE as f64).round() as i64
    }

    pub fn set_m(&mut self, m: i64) {
        self.p = m.clamp(0, MAX_MAGNITUDE) as f64 / MAX_MAGNITUDE as f64;
    }

    /// Probability handed to each sampled transform.
    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn transforms(&self) -> &[Arc<dyn ViTransform<T>>] {
        &self.transforms
    }

    /// Draws one sample from the policy's own generator.
    pub fn sample(&mut self) -> Vec<ViBoundTransform<T>> {
        let mut rng = self.rng.clone();
        let sample = self.sample_with(&mut rng);
        self.rng = rng;
        sample
    }

    /// Draws one sample from an external generator, leaving the policy's own
    /// state untouched.
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<ViBoundTransform<T>> {
        let mut picks = index::sample(rng, self.transforms.len(), self.n).into_vec();
        if self.shuffle {
            picks.shuffle(rng);
        } else {
            picks.sort_unstable();
        }
        let sample: Vec<ViBoundTransform<T>> = picks
            .into_iter()
            .map(|i| ViBoundTransform::new(Arc::clone(&self.transforms[i]), self.p))
            .collect();
        log::debug!(
            "randaugment sample (p={}): {:?}",
            self.p,
            sample.iter().map(ViBoundTransform::name).collect::<Vec<_>>()
        );
        sample
    }

    /// Samples `n` transforms and applies them in turn.
    pub fn apply(&mut self, input: &T) -> Result<T>
    where
        T: Clone,
    {
        let mut rng = self.rng.clone();
        let output = self.apply_with(input, &mut rng);
        self.rng = rng;
        output
    }

    /// Like [`ViRandAugment::apply`], drawing from `rng`.
    pub fn apply_with(&self, input: &T, rng: &mut dyn RngCore) -> Result<T>
    where
        T: Clone,
    {
        let sample = self.sample_with(rng);
        let mut current = input.clone();
        for bound in &sample {
            current = bound.apply(&current, rng)?;
        }
        Ok(current)
    }
}

impl<T> fmt::Debug for ViRandAugment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViRandAugment")
            .field(
                "transforms",
                &self.transforms.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .field("n", &self.n)
            .field("m", &self.m())
            .field("shuffle", &self.shuffle)
            .finish()
    }
}

impl<T> Iterator for ViRandAugment<T> {
    type Item = Vec<ViBoundTransform<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.sample())
    }
}
