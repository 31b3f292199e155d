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

//! # Timeseries Transforms
//!
//! Augmentations for one-dimensional numeric sequences, in the time domain
//! and in the frequency domain.
//!
//! - **time**: `add_slope_trend`, `add_spike`, `add_step_trend`, `add_warp`,
//!   `crop_and_stretch`, `flip`, `reverse`
//! - **freq**: `add_discrete_phase_shifts`, `add_high_frequency_noise`,
//!   `add_random_frequency_noise`, `remove_random_frequency`
//!
//! Besides the probability `p`, most transforms take a magnitude `m`, usually
//! a multiple of the sequence's standard deviation or length. Outputs always
//! have the input's length.

pub mod freq;
pub mod time;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ViError};
use crate::transform::{ViFnTransform, ViTransform};

pub use self::freq::{
    add_discrete_phase_shifts, add_high_frequency_noise, add_random_frequency_noise,
    remove_random_frequency,
};
pub use self::time::{
    add_slope_trend, add_spike, add_step_trend, add_warp, crop_and_stretch, flip, reverse,
};

/// Interpolation used when resampling a sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViInterpolation {
    #[default]
    Linear,
    Nearest,
    Previous,
    Next,
}

/// Names resolvable through [`transform_by_name`], with their default
/// probability and magnitude.
pub const TRANSFORM_NAMES: &[(&str, f64, f64)] = &[
    ("add_slope_trend", 0.01, 0.1),
    ("add_spike", 0.01, 1.0),
    ("add_step_trend", 0.01, 0.1),
    ("add_warp", 0.01, 0.1),
    ("crop_and_stretch", 0.01, 0.1),
    ("flip", 0.5, 0.0),
    ("reverse", 0.5, 0.0),
    ("add_discrete_phase_shifts", 0.01, 0.1),
    ("add_high_frequency_noise", 0.01, 0.1),
    ("add_random_frequency_noise", 0.01, 0.1),
    ("remove_random_frequency", 0.01, 0.0),
];

/// Default magnitude of a catalogued series transform.
pub fn default_magnitude(name: &str) -> Option<f64> {
    TRANSFORM_NAMES
        .iter()
        .find(|(known, _, _)| *known == name)
        .map(|(_, _, m)| *m)
}

/// Resolves a series transform by name with a fixed magnitude `m`
/// (ignored by `flip`, `reverse` and `remove_random_frequency`).
pub fn transform_by_name(name: &str, m: f64) -> Result<Arc<dyn ViTransform<Vec<f64>>>> {
    macro_rules! scaled {
        ($func:path) => {
            ViFnTransform::new(name, move |x: &Vec<f64>, p, rng| $func(x, p, m, rng)).shared()
        };
    }
    macro_rules! resampled {
        ($func:path) => {
            ViFnTransform::new(name, move |x: &Vec<f64>, p, rng| {
                $func(x, p, m, ViInterpolation::Linear, rng)
            })
            .shared()
        };
    }
    macro_rules! unscaled {
        ($func:path) => {
            ViFnTransform::new(name, |x: &Vec<f64>, p, rng| $func(x, p, rng)).shared()
        };
    }

    let transform = match name {
        "add_slope_trend" => scaled!(time::add_slope_trend),
        "add_spike" => scaled!(time::add_spike),
        "add_step_trend" => scaled!(time::add_step_trend),
        "add_warp" => resampled!(time::add_warp),
        "crop_and_stretch" => resampled!(time::crop_and_stretch),
        "flip" => unscaled!(time::flip),
        "reverse" => unscaled!(time::reverse),
        "add_discrete_phase_shifts" => scaled!(freq::add_discrete_phase_shifts),
        "add_high_frequency_noise" => scaled!(freq::add_high_frequency_noise),
        "add_random_frequency_noise" => scaled!(freq::add_random_frequency_noise),
        "remove_random_frequency" => unscaled!(freq::remove_random_frequency),
        other => {
            return Err(ViError::validation(format!(
                "unknown series transform '{other}'"
            )))
        }
    };
    Ok(transform)
}

pub(crate) fn ensure_magnitude(name: &str, m: f64) -> Result<()> {
    if m.is_finite() {
        Ok(())
    } else {
        Err(ViError::validation(format!(
            "{name}: magnitude must be finite, got {m}"
        )))
    }
}

/// Population standard deviation, ignoring NaN entries. Sequences without a
/// single finite value have a deviation of zero.
pub fn nan_std(x: &[f64]) -> f64 {
    let values: Vec<f64> = x.iter().copied().filter(|v| !v.is_nan()).collect();
    if values.is_empty() {
        return 0.0;
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    variance.sqrt()
}

/// `count` evenly spaced values from `start` to `stop`, both inclusive.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        stop
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Evaluates the piecewise function through `(grid, values)` at `at`.
///
/// `grid` must be sorted ascending and have the same length as `values`;
/// points outside the grid are clamped to its ends.
pub fn interpolate(grid: &[f64], values: &[f64], at: &[f64], kind: ViInterpolation) -> Vec<f64> {
    if grid.is_empty() || values.len() != grid.len() {
        return Vec::new();
    }
    if grid.len() == 1 {
        return vec![values[0]; at.len()];
    }

    let last = grid.len() - 1;
    at.iter()
        .map(|&t| {
            if t <= grid[0] {
                return values[0];
            }
            if t >= grid[last] {
                return values[last];
            }
            // grid[hi - 1] < t <= grid[hi]
            let hi = grid.partition_point(|&g| g < t).clamp(1, last);
            let lo = hi - 1;
            let (x0, x1) = (grid[lo], grid[hi]);
            let (y0, y1) = (values[lo], values[hi]);
            match kind {
                ViInterpolation::Linear => {
                    if x1 == x0 {
                        y0
                    } else {
                        y0 + (y1 - y0) * (t - x0) / (x1 - x0)
                    }
                }
                ViInterpolation::Nearest => {
                    if t - x0 <= x1 - t {
                        y0
                    } else {
                        y1
                    }
                }
                ViInterpolation::Previous => {
                    if t == x1 {
                        y1
                    } else {
                        y0
                    }
                }
                ViInterpolation::Next => y1,
            }
        })
        .collect()
}
