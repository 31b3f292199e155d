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

//! # Dataset Adapters
//!
//! Thin wrappers that hand augmented samples to a training loop: an iterator
//! adapter for any stream of inputs, and an in-memory labelled dataset with
//! random access.
//!
//! ```rust
//! use vix::augment::ViRandAugment;
//! use vix::dataset::ViAugmentExt;
//! use vix::text;
//!
//! let policy = ViRandAugment::new(
//!     vec![text::transform_by_name("add_love").unwrap()],
//!     100,
//!     1,
//!     true,
//!     Some(3),
//! )
//! .unwrap();
//! let out: Vec<String> = vec!["i hate this".to_string()]
//!     .into_iter()
//!     .augment_with(policy)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(out, vec!["i hate this love".to_string()]);
//! ```

use crate::augment::ViRandAugment;
use crate::errors::Result;

/// Iterator yielding each item of `I` after a pass through a policy.
#[derive(Debug)]
pub struct ViAugmentedIter<I, T> {
    inner: I,
    policy: ViRandAugment<T>,
}

impl<I, T> ViAugmentedIter<I, T> {
    pub fn new(inner: I, policy: ViRandAugment<T>) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &ViRandAugment<T> {
        &self.policy
    }

    pub fn into_inner(self) -> (I, ViRandAugment<T>) {
        (self.inner, self.policy)
    }
}

impl<I, T> Iterator for ViAugmentedIter<I, T>
where
    I: Iterator<Item = T>,
    T: Clone,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        Some(self.policy.apply(&item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Extension adding [`ViAugmentExt::augment_with`] to every iterator.
pub trait ViAugmentExt: Iterator + Sized {
    fn augment_with(self, policy: ViRandAugment<Self::Item>) -> ViAugmentedIter<Self, Self::Item>
    where
        Self::Item: Clone,
    {
        ViAugmentedIter::new(self, policy)
    }
}

impl<I: Iterator> ViAugmentExt for I {}

/// In-memory `(text, label)` samples served through a text policy.
///
/// Every access draws a fresh augmentation, so reading the same index twice
/// generally returns different text with the same label.
#[derive(Debug)]
pub struct ViAugmentedDataset<L> {
    samples: Vec<(String, L)>,
    policy: ViRandAugment<String>,
}

impl<L: Clone> ViAugmentedDataset<L> {
    pub fn new(samples: Vec<(String, L)>, policy: ViRandAugment<String>) -> Self {
        Self { samples, policy }
    }

    /// Pairs `texts` with `labels`; extra entries on either side are dropped.
    pub fn from_parts<T, S>(texts: T, labels: Vec<L>, policy: ViRandAugment<String>) -> Self
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let samples = texts
            .into_iter()
            .map(Into::into)
            .zip(labels)
            .collect();
        Self::new(samples, policy)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The stored sample, without augmentation.
    pub fn raw(&self, index: usize) -> Option<&(String, L)> {
        self.samples.get(index)
    }

    /// An augmented copy of sample `index`.
    pub fn get(&mut self, index: usize) -> Option<Result<(String, L)>> {
        let (text, label) = self.samples.get(index)?;
        let label = label.clone();
        Some(self.policy.apply(text).map(|augmented| (augmented, label)))
    }

    /// Augmented copies of every sample, in order.
    pub fn iter(&mut self) -> impl Iterator<Item = Result<(String, L)>> + '_ {
        let Self { samples, policy } = self;
        samples.iter().map(move |(text, label)| {
            policy
                .apply(text)
                .map(|augmented| (augmented, label.clone()))
        })
    }
}
