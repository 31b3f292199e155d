//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Vi.
//! The Vi project belongs to the Dunimd project team.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use vix::timeseries::{default_magnitude, transform_by_name, TRANSFORM_NAMES};
use vix::transform::ViTransform;

fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

#[test]
fn every_entry_has_its_default_magnitude() {
    for (name, p, m) in TRANSFORM_NAMES {
        assert_eq!(default_magnitude(name), Some(*m));
        assert!((0.0..=1.0).contains(p));
    }
}

proptest! {
    #[test]
    fn transforms_are_deterministic_under_a_fixed_seed(
        x in proptest::collection::vec(-1e3f64..1e3, 2..64),
        p in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        for (name, _, m) in TRANSFORM_NAMES {
            let transform = transform_by_name(name, *m).unwrap();
            let first = transform.apply(&x, p, &mut rng(seed)).unwrap();
            let second = transform.apply(&x, p, &mut rng(seed)).unwrap();
            prop_assert_eq!(first.len(), x.len(), "{}", name);
            prop_assert_eq!(first, second, "{}", name);
        }
    }

    #[test]
    fn transforms_are_identity_at_zero_probability(
        x in proptest::collection::vec(-1e3f64..1e3, 2..64),
        seed in any::<u64>(),
    ) {
        for (name, _, m) in TRANSFORM_NAMES {
            let transform = transform_by_name(name, *m).unwrap();
            let out = transform.apply(&x, 0.0, &mut rng(seed)).unwrap();
            prop_assert_eq!(out, x.clone(), "{}", name);
        }
    }
}
