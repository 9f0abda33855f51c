//! Raw sampling primitives on top of an explicitly passed generator.
//!
//! Every sampler in the crate draws through these functions, so a given seed and call
//! sequence always reproduces the same output.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::{Error, Result};
use crate::points::PointSet;

/// Largest rate handed to a single Knuth draw; larger rates are split into chunks.
const POISSON_CHUNK: f64 = 30.0;

/// Build a seeded generator. Without a seed a fresh one is drawn from the thread
/// generator and logged so the run can be reproduced.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| {
        let fresh = rand::rng().next_u64();
        debug!("No seed supplied; using fresh seed {}.", fresh);
        fresh
    });
    StdRng::seed_from_u64(seed)
}

/// Uniform float in `[0, 1)` with 53 bits of precision.
#[inline]
pub fn rand01(rng: &mut dyn Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Two independent standard normal values (Box-Muller).
pub fn standard_normal_pair(rng: &mut dyn Rng) -> (f64, f64) {
    let u1 = (1.0 - rand01(rng)).clamp(f64::MIN_POSITIVE, 1.0);
    let u2 = rand01(rng);

    let r = (-2.0 * u1.ln()).sqrt();
    let theta = 2.0 * core::f64::consts::PI * u2;

    (r * theta.cos(), r * theta.sin())
}

/// `rows x dim` matrix of values in `[0, 1)`.
///
/// Draws run axis by axis: all `rows` values of axis 0 first, then axis 1, and so on.
pub fn uniform(rows: usize, dim: usize, rng: &mut dyn Rng) -> PointSet {
    let mut out = PointSet::zeros(rows, dim);
    for axis in 0..dim {
        for row in 0..rows {
            out.row_mut(row)[axis] = rand01(rng);
        }
    }
    out
}

/// `rows x dim` matrix of standard normal values, filled in row-major order.
pub fn normal(rows: usize, dim: usize, rng: &mut dyn Rng) -> PointSet {
    let mut out = PointSet::zeros(rows, dim);
    for pair in out.as_flat_mut().chunks_mut(2) {
        let (a, b) = standard_normal_pair(rng);
        pair[0] = a;
        if let Some(second) = pair.get_mut(1) {
            *second = b;
        }
    }
    out
}

/// `count` independent Poisson draws with rate `lambda`.
pub fn poisson(lambda: f64, count: usize, rng: &mut dyn Rng) -> Result<Vec<u64>> {
    if !lambda.is_finite() || lambda < 0.0 {
        return Err(Error::InvalidConfig(format!(
            "poisson rate must be finite and >= 0, got {lambda}"
        )));
    }
    Ok((0..count).map(|_| poisson_count(lambda, rng)).collect())
}

/// One Poisson draw. Rates above [`POISSON_CHUNK`] are the sum of smaller Poisson
/// draws, which keeps `exp(-lambda)` away from underflow.
///
/// Costs about `lambda + lambda / POISSON_CHUNK` uniform draws, so time grows linearly
/// with the rate.
pub(crate) fn poisson_count(lambda: f64, rng: &mut dyn Rng) -> u64 {
    if !lambda.is_finite() || lambda <= 0.0 {
        return 0;
    }

    let mut remaining = lambda;
    let mut total = 0;
    while remaining > 0.0 {
        let step = remaining.min(POISSON_CHUNK);
        total += poisson_knuth(step, rng);
        remaining -= step;
    }
    total
}

fn poisson_knuth(lambda: f64, rng: &mut dyn Rng) -> u64 {
    let l = (-lambda).exp();
    let mut k: u64 = 0;
    let mut p: f64 = 1.0;

    loop {
        k += 1;
        p *= rand01(rng);
        if p <= l {
            return k - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRng {
        value: u64,
    }

    impl rand::TryRng for FixedRng {
        type Error = core::convert::Infallible;

        fn try_next_u32(&mut self) -> core::result::Result<u32, Self::Error> {
            Ok(self.value as u32)
        }

        fn try_next_u64(&mut self) -> core::result::Result<u64, Self::Error> {
            Ok(self.value)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), Self::Error> {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 8];
            }
            Ok(())
        }
    }

    #[test]
    fn rand01_covers_half_open_unit_interval() {
        assert_eq!(rand01(&mut FixedRng { value: 0 }), 0.0);
        let top = rand01(&mut FixedRng { value: u64::MAX });
        assert!(top < 1.0);
        assert!(top > 0.999_999);
        let mid = rand01(&mut FixedRng { value: 1 << 63 });
        assert_eq!(mid, 0.5);
    }

    #[test]
    fn normal_pair_is_finite_for_extreme_inputs() {
        for value in [0, 1, u64::MAX / 2, u64::MAX] {
            let (a, b) = standard_normal_pair(&mut FixedRng { value });
            assert!(a.is_finite() && b.is_finite(), "value {value}");
        }
    }

    #[test]
    fn seeded_generators_reproduce() {
        let a = uniform(4, 2, &mut rng_from_seed(Some(42)));
        let b = uniform(4, 2, &mut rng_from_seed(Some(42)));
        let c = uniform(4, 2, &mut rng_from_seed(Some(43)));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn uniform_and_normal_shapes() {
        let mut rng = StdRng::seed_from_u64(7);
        let u = uniform(10, 3, &mut rng);
        assert_eq!((u.len(), u.dim()), (10, 3));
        assert!(u.as_flat().iter().all(|&x| (0.0..1.0).contains(&x)));

        let n = normal(5, 3, &mut rng);
        assert_eq!((n.len(), n.dim()), (5, 3));
        assert!(n.as_flat().iter().all(|x| x.is_finite()));
    }

    #[test]
    fn normal_moments_are_plausible() {
        let mut rng = StdRng::seed_from_u64(11);
        let n = normal(20_000, 1, &mut rng);
        let values = n.as_flat();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let var = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var - 1.0).abs() < 0.05, "variance {var}");
    }

    #[test]
    fn poisson_rejects_bad_rates_and_handles_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(poisson(-1.0, 3, &mut rng).is_err());
        assert!(poisson(f64::NAN, 3, &mut rng).is_err());
        assert_eq!(poisson(0.0, 3, &mut rng).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn poisson_mean_tracks_rate_including_large_rates() {
        let mut rng = StdRng::seed_from_u64(5);
        for lambda in [2.5, 250.0] {
            let draws = poisson(lambda, 4_000, &mut rng).unwrap();
            let mean = draws.iter().sum::<u64>() as f64 / draws.len() as f64;
            assert!(
                (mean - lambda).abs() < 0.1 * lambda,
                "lambda {lambda}, mean {mean}"
            );
        }
    }
}
