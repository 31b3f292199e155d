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

//! Frequency-domain transforms.
//!
//! Each transform takes the real FFT of the series (`n / 2 + 1` bins),
//! perturbs the spectrum and returns the inverse transform at the original
//! length. Noise never touches bin 0 (the series mean); phase shifts start
//! at bin 1 but may swap a bin with bin 0. At `p = 0` every transform
//! returns its input without a round trip through the FFT.

use std::cmp::Ordering;

use rand::Rng;
use rand_distr::StandardNormal;
use realfft::num_complex::Complex;
use realfft::RealFftPlanner;

use super::ensure_magnitude;
use crate::errors::{Result, ViError};
use crate::transform::{coin, ensure_probability};

/// Forward real FFT of `x`.
pub fn rfft(x: &[f64]) -> Result<Vec<Complex<f64>>> {
    if x.is_empty() {
        return Ok(Vec::new());
    }
    let mut planner = RealFftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(x.len());
    let mut input = x.to_vec();
    let mut spectrum = forward.make_output_vec();
    forward
        .process(&mut input, &mut spectrum)
        .map_err(|err| ViError::transform("rfft", err.to_string()))?;
    Ok(spectrum)
}

/// Inverse real FFT producing `len` samples, normalised by `1 / len`.
///
/// The imaginary parts of bin 0 and, for even `len`, of the Nyquist bin
/// carry no information for a real signal and are discarded.
pub fn irfft(spectrum: &[Complex<f64>], len: usize) -> Result<Vec<f64>> {
    if len == 0 {
        return Ok(Vec::new());
    }
    if spectrum.len() != len / 2 + 1 {
        return Err(ViError::transform(
            "irfft",
            format!(
                "spectrum of {} bins cannot produce {len} samples",
                spectrum.len()
            ),
        ));
    }

    let mut planner = RealFftPlanner::<f64>::new();
    let inverse = planner.plan_fft_inverse(len);
    let mut bins = spectrum.to_vec();
    bins[0].im = 0.0;
    if len % 2 == 0 {
        if let Some(nyquist) = bins.last_mut() {
            nyquist.im = 0.0;
        }
    }
    let mut output = inverse.make_output_vec();
    inverse
        .process(&mut bins, &mut output)
        .map_err(|err| ViError::transform("irfft", err.to_string()))?;

    let scale = 1.0 / len as f64;
    output.iter_mut().for_each(|v| *v *= scale);
    Ok(output)
}

/// Largest bin, ordering by real part and then imaginary part.
fn spectrum_max(spectrum: &[Complex<f64>]) -> Complex<f64> {
    spectrum
        .iter()
        .copied()
        .max_by(|a, b| match a.re.total_cmp(&b.re) {
            Ordering::Equal => a.im.total_cmp(&b.im),
            other => other,
        })
        .unwrap_or_default()
}

fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> Complex<f64> {
    Complex::new(rng.sample(StandardNormal), rng.sample(StandardNormal))
}

/// Swaps frequency bins with a neighbor `round(bins * m)` away.
///
/// Each bin is selected with probability `p`. A selected bin `i` is swapped
/// with bin `i ± step` (direction uniform, index clamped to the valid range)
/// when that bin is selected too; both are then marked so no bin moves twice.
/// Bin 0 is never the starting bin of a swap, but it can be the partner.
pub fn add_discrete_phase_shifts<R: Rng + ?Sized>(
    x: &[f64],
    p: f64,
    m: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    ensure_probability("add_discrete_phase_shifts", p)?;
    ensure_magnitude("add_discrete_phase_shifts", m)?;
    if p == 0.0 {
        return Ok(x.to_vec());
    }
    let mut spectrum = rfft(x)?;
    let bins = spectrum.len();
    if bins < 2 {
        return Ok(x.to_vec());
    }

    #[derive(Clone, Copy, PartialEq)]
    enum Slot {
        Idle,
        Selected,
        Moved,
    }

    let reach = bins as f64;
    let step = (reach * m).round().clamp(-reach, reach) as i64;
    let mut slots: Vec<Slot> = (0..bins)
        .map(|_| if coin(rng, p) { Slot::Selected } else { Slot::Idle })
        .collect();
    let signs: Vec<i64> = (0..bins)
        .map(|_| if rng.gen_bool(0.5) { 1 } else { -1 })
        .collect();

    for i in 1..bins {
        if slots[i] != Slot::Selected {
            continue;
        }
        let j = (i as i64 + signs[i] * step).clamp(0, bins as i64 - 1) as usize;
        if slots[j] == Slot::Selected {
            spectrum.swap(i, j);
            slots[i] = Slot::Moved;
            slots[j] = Slot::Moved;
        }
    }

    irfft(&spectrum, x.len())
}

/// Adds complex Gaussian noise to each bin with probability `p`, scaled by
/// `m * max(spectrum)`.
pub fn add_random_frequency_noise<R: Rng + ?Sized>(
    x: &[f64],
    p: f64,
    m: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    ensure_probability("add_random_frequency_noise", p)?;
    ensure_magnitude("add_random_frequency_noise", m)?;
    if p == 0.0 {
        return Ok(x.to_vec());
    }
    let mut spectrum = rfft(x)?;
    if spectrum.len() < 2 {
        return Ok(x.to_vec());
    }
    let scale = spectrum_max(&spectrum) * m;
    for bin in spectrum.iter_mut().skip(1) {
        if coin(rng, p) {
            *bin += gaussian(rng) * scale;
        }
    }
    irfft(&spectrum, x.len())
}

/// Adds complex Gaussian noise, scaled by `m * max(spectrum)`, to the
/// highest frequency bin only, with probability `p`.
pub fn add_high_frequency_noise<R: Rng + ?Sized>(
    x: &[f64],
    p: f64,
    m: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    ensure_probability("add_high_frequency_noise", p)?;
    ensure_magnitude("add_high_frequency_noise", m)?;
    if p == 0.0 {
        return Ok(x.to_vec());
    }
    let mut spectrum = rfft(x)?;
    if spectrum.len() < 2 || !coin(rng, p) {
        return Ok(x.to_vec());
    }
    let scale = spectrum_max(&spectrum) * m;
    let noise = gaussian(rng) * scale;
    if let Some(highest) = spectrum.last_mut() {
        *highest += noise;
    }
    irfft(&spectrum, x.len())
}

/// Zeroes each frequency bin, the mean included, with probability `p`.
pub fn remove_random_frequency<R: Rng + ?Sized>(x: &[f64], p: f64, rng: &mut R) -> Result<Vec<f64>> {
    ensure_probability("remove_random_frequency", p)?;
    if p == 0.0 {
        return Ok(x.to_vec());
    }
    let mut spectrum = rfft(x)?;
    for bin in spectrum.iter_mut() {
        if coin(rng, p) {
            *bin = Complex::new(0.0, 0.0);
        }
    }
    irfft(&spectrum, x.len())
}
