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

//! Time-domain transforms.

use rand::seq::index;
use rand::Rng;

use super::{ensure_magnitude, interpolate, linspace, nan_std, ViInterpolation};
use crate::errors::Result;
use crate::transform::{coin, ensure_probability};

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

/// Adds a linear trend from 0 to `±m * std(x)` with probability `p`.
///
/// `p` applies to the whole trend; its direction is chosen uniformly.
pub fn add_slope_trend<R: Rng + ?Sized>(x: &[f64], p: f64, m: f64, rng: &mut R) -> Result<Vec<f64>> {
    ensure_probability("add_slope_trend", p)?;
    ensure_magnitude("add_slope_trend", m)?;
    if !coin(rng, p) {
        return Ok(x.to_vec());
    }
    let sign = random_sign(rng);
    let trend = linspace(0.0, sign * m * nan_std(x), x.len());
    Ok(x.iter().zip(trend).map(|(v, t)| v + t).collect())
}

/// Adds a spike of `±m * std(x)` to each entry with probability `p`.
pub fn add_spike<R: Rng + ?Sized>(x: &[f64], p: f64, m: f64, rng: &mut R) -> Result<Vec<f64>> {
    ensure_probability("add_spike", p)?;
    ensure_magnitude("add_spike", m)?;
    let height = m * nan_std(x);
    Ok(x
        .iter()
        .map(|v| {
            if coin(rng, p) {
                v + random_sign(rng) * height
            } else {
                *v
            }
        })
        .collect())
}

/// Adds a stepwise trend: every entry has probability `p` of a step of
/// `m * std(x)`, and steps accumulate.
///
/// One direction is drawn for the whole series, so all steps go the same way.
pub fn add_step_trend<R: Rng + ?Sized>(x: &[f64], p: f64, m: f64, rng: &mut R) -> Result<Vec<f64>> {
    ensure_probability("add_step_trend", p)?;
    ensure_magnitude("add_step_trend", m)?;
    let step = random_sign(rng) * m * nan_std(x);
    let mut level = 0.0;
    Ok(x
        .iter()
        .map(|v| {
            if coin(rng, p) {
                level += step;
            }
            v + level
        })
        .collect())
}

/// Warps the spacing between points.
///
/// With probability `p` the series is upsampled onto a grid `round(n * m)`
/// times finer, `n` distinct grid points are drawn uniformly, and the series
/// is re-read at those points (sorted). A factor below 2 leaves no room to
/// warp, and a grid too large to index is not built; both return the input.
pub fn add_warp<R: Rng + ?Sized>(
    x: &[f64],
    p: f64,
    m: f64,
    interp: ViInterpolation,
    rng: &mut R,
) -> Result<Vec<f64>> {
    ensure_probability("add_warp", p)?;
    ensure_magnitude("add_warp", m)?;
    let size = x.len();
    let factor = (size as f64 * m).round();
    if factor < 2.0 {
        return Ok(x.to_vec());
    }
    let Some(stretched) = size.checked_mul(factor.min(usize::MAX as f64) as usize) else {
        return Ok(x.to_vec());
    };
    if !coin(rng, p) {
        return Ok(x.to_vec());
    }

    let mut picks = index::sample(rng, stretched, size).into_vec();
    picks.sort_unstable();
    let denominator = (stretched - 1) as f64;
    let at: Vec<f64> = picks.into_iter().map(|i| i as f64 / denominator).collect();

    Ok(interpolate(&linspace(0.0, 1.0, size), x, &at, interp))
}

/// Crops a window and stretches it back to the original length.
///
/// With probability `p`, a random window of `round((1 - m) * n)` entries is
/// kept and resampled to `n` entries. Windows that would be empty or cover
/// the whole series return the input.
pub fn crop_and_stretch<R: Rng + ?Sized>(
    x: &[f64],
    p: f64,
    m: f64,
    interp: ViInterpolation,
    rng: &mut R,
) -> Result<Vec<f64>> {
    ensure_probability("crop_and_stretch", p)?;
    ensure_magnitude("crop_and_stretch", m)?;
    let size = x.len();
    let crop = ((1.0 - m) * size as f64).round();
    if crop < 1.0 || crop >= size as f64 || !coin(rng, p) {
        return Ok(x.to_vec());
    }

    let crop = crop as usize;
    let start = rng.gen_range(0..size - crop);
    let window = &x[start..start + crop];
    Ok(interpolate(
        &linspace(0.0, 1.0, crop),
        window,
        &linspace(0.0, 1.0, size),
        interp,
    ))
}

/// Negates the series with probability `p`.
pub fn flip<R: Rng + ?Sized>(x: &[f64], p: f64, rng: &mut R) -> Result<Vec<f64>> {
    ensure_probability("flip", p)?;
    if coin(rng, p) {
        return Ok(x.iter().map(|v| -v).collect());
    }
    Ok(x.to_vec())
}

/// Reverses the order of the series with probability `p`.
pub fn reverse<R: Rng + ?Sized>(x: &[f64], p: f64, rng: &mut R) -> Result<Vec<f64>> {
    ensure_probability("reverse", p)?;
    if coin(rng, p) {
        return Ok(x.iter().rev().copied().collect());
    }
    Ok(x.to_vec())
}
