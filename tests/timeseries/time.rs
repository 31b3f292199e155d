//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Vi.
//! The Vi project belongs to the Dunimd project team.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use vix::timeseries::*;
use vix::transform::ViTransform;

const EPS: f64 = 1e-9;

fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

fn sine() -> Vec<f64> {
    linspace(0.0, 6.0 * std::f64::consts::PI, 100)
        .into_iter()
        .map(f64::sin)
        .collect()
}

fn assert_close(a: &[f64], b: &[f64]) {
    assert_eq!(a.len(), b.len());
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert!((x - y).abs() < EPS, "index {i}: {x} != {y}");
    }
}

fn diff(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

#[test]
fn transforms_are_identity_without_probability_or_magnitude() {
    let x = sine();
    let mut rng = rng(1);
    for (p, m) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)] {
        assert_close(&add_slope_trend(&x, p, m, &mut rng).unwrap(), &x);
        assert_close(&add_spike(&x, p, m, &mut rng).unwrap(), &x);
        assert_close(&add_step_trend(&x, p, m, &mut rng).unwrap(), &x);
    }
}

#[test]
fn slope_trend_ends_at_one_deviation() {
    let x = sine();
    let std = nan_std(&x);
    let res = add_slope_trend(&x, 1.0, 1.0, &mut rng(2)).unwrap();
    let d = diff(&res, &x);
    assert_eq!(d[0], 0.0);
    assert!((d[99].abs() - std).abs() < EPS);
    assert!(d[1..].iter().all(|v| *v != 0.0));
}

#[test]
fn spike_moves_every_entry_by_one_deviation() {
    let x = sine();
    let std = nan_std(&x);
    let res = add_spike(&x, 1.0, 1.0, &mut rng(3)).unwrap();
    for v in diff(&res, &x) {
        assert!((v.abs() - std).abs() < EPS);
    }
}

#[test]
fn step_trend_accumulates_in_one_direction() {
    let x = sine();
    let std = nan_std(&x);
    let res = add_step_trend(&x, 1.0, 1.0, &mut rng(4)).unwrap();
    let d = diff(&res, &x);
    let sign = d[0].signum();
    for (k, v) in d.iter().enumerate() {
        assert_eq!(v.signum(), sign);
        assert!((v.abs() - (k + 1) as f64 * std).abs() < 1e-6);
    }
}

#[test]
fn flip_and_reverse() {
    let x = vec![1.0, -2.0, 3.5];
    let mut rng = rng(5);
    assert_eq!(flip(&x, 1.0, &mut rng).unwrap(), vec![-1.0, 2.0, -3.5]);
    assert_eq!(reverse(&x, 1.0, &mut rng).unwrap(), vec![3.5, -2.0, 1.0]);
    assert_eq!(flip(&x, 0.0, &mut rng).unwrap(), x);
    assert_eq!(reverse(&x, 0.0, &mut rng).unwrap(), x);
}

#[test]
fn crop_and_stretch_degenerate_windows_are_identity() {
    let x = sine();
    let mut rng = rng(6);
    for m in [0.0, 1.0] {
        let res = crop_and_stretch(&x, 1.0, m, ViInterpolation::Linear, &mut rng).unwrap();
        assert_eq!(res, x);
    }
}

#[test]
fn crop_and_stretch_resamples_a_window() {
    let x: Vec<f64> = (0..50).map(f64::from).collect();
    let res = crop_and_stretch(&x, 1.0, 0.5, ViInterpolation::Linear, &mut rng(7)).unwrap();
    assert_eq!(res.len(), x.len());
    let span = res[res.len() - 1] - res[0];
    assert!((span - 24.0).abs() < EPS, "window spans {span}");
    assert!(res.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn warp_keeps_length_and_range() {
    let x: Vec<f64> = (0..40).map(f64::from).collect();
    let res = add_warp(&x, 1.0, 0.1, ViInterpolation::Linear, &mut rng(8)).unwrap();
    assert_eq!(res.len(), x.len());
    assert!(res.windows(2).all(|w| w[0] < w[1]));
    assert!(res.iter().all(|v| (0.0..=39.0).contains(v)));
}

#[test]
fn warp_with_oversized_grid_is_identity() {
    let x = vec![1.0; 10];
    for m in [1e18, 1e300] {
        let res = add_warp(&x, 1.0, m, ViInterpolation::Linear, &mut rng(13)).unwrap();
        assert_eq!(res, x);
    }
}

#[test]
fn warp_with_small_factor_is_identity() {
    let x = vec![1.0, 2.0, 3.0];
    let res = add_warp(&x, 1.0, 0.1, ViInterpolation::Nearest, &mut rng(9)).unwrap();
    assert_eq!(res, x);
}

#[test]
fn interpolation_kinds() {
    let grid = [0.0, 1.0, 2.0];
    let values = [0.0, 10.0, 20.0];
    let at = [0.5, 1.0, 1.5, -1.0, 3.0];
    assert_eq!(
        interpolate(&grid, &values, &at, ViInterpolation::Linear),
        vec![5.0, 10.0, 15.0, 0.0, 20.0]
    );
    assert_eq!(
        interpolate(&grid, &values, &at, ViInterpolation::Nearest),
        vec![0.0, 10.0, 10.0, 0.0, 20.0]
    );
    assert_eq!(
        interpolate(&grid, &values, &at, ViInterpolation::Previous),
        vec![0.0, 10.0, 10.0, 0.0, 20.0]
    );
    assert_eq!(
        interpolate(&grid, &values, &at, ViInterpolation::Next),
        vec![10.0, 10.0, 20.0, 0.0, 20.0]
    );
}

#[test]
fn std_ignores_nan() {
    assert!((nan_std(&[1.0, f64::NAN, 3.0]) - 1.0).abs() < EPS);
    assert_eq!(nan_std(&[f64::NAN]), 0.0);
    assert_eq!(nan_std(&[]), 0.0);
}

#[test]
fn catalog_resolves_series_transforms() {
    for (name, _, m) in TRANSFORM_NAMES {
        let transform = transform_by_name(name, *m).unwrap();
        assert_eq!(transform.name(), *name);
        let out = transform.apply(&sine(), 0.5, &mut rng(10)).unwrap();
        assert_eq!(out.len(), 100);
    }
    assert!(transform_by_name("add_noise", 0.1).is_err());
}

proptest! {
    #[test]
    fn time_transforms_preserve_length(
        x in proptest::collection::vec(-1e3f64..1e3, 0..64),
        p in 0.0f64..=1.0,
        m in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let mut rng = rng(seed);
        prop_assert_eq!(add_slope_trend(&x, p, m, &mut rng).unwrap().len(), x.len());
        prop_assert_eq!(add_spike(&x, p, m, &mut rng).unwrap().len(), x.len());
        prop_assert_eq!(add_step_trend(&x, p, m, &mut rng).unwrap().len(), x.len());
        prop_assert_eq!(add_warp(&x, p, m, ViInterpolation::Linear, &mut rng).unwrap().len(), x.len());
        prop_assert_eq!(
            crop_and_stretch(&x, p, m, ViInterpolation::Previous, &mut rng).unwrap().len(),
            x.len()
        );
        prop_assert_eq!(flip(&x, p, &mut rng).unwrap().len(), x.len());
        prop_assert_eq!(reverse(&x, p, &mut rng).unwrap().len(), x.len());
    }
}
