//! Gaussian point cloud around a single center.
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};
use crate::points::PointSet;
use crate::random;

/// Per-axis scale of a Gaussian cluster.
///
/// The value multiplies a standard normal draw, so a negative radius mirrors the cloud
/// through its center instead of being rejected.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Radius {
    /// Same standard deviation on every axis.
    Isotropic(f64),
    /// One standard deviation per axis; length must match the center.
    PerAxis(Vec<f64>),
}

impl Radius {
    fn on_axis(&self, axis: usize) -> f64 {
        match self {
            Radius::Isotropic(r) => *r,
            Radius::PerAxis(r) => r[axis],
        }
    }
}

impl From<f64> for Radius {
    fn from(value: f64) -> Self {
        Radius::Isotropic(value)
    }
}

impl From<Vec<f64>> for Radius {
    fn from(value: Vec<f64>) -> Self {
        Radius::PerAxis(value)
    }
}

/// Normally distributed points around `center`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaussianClusterSampling {
    /// Number of points to generate.
    pub count: usize,
    /// Cluster center; its length fixes the dimensionality.
    pub center: Vec<f64>,
    /// Scale applied to the standard normal draws.
    pub radius: Radius,
}

impl GaussianClusterSampling {
    pub fn new(count: usize, center: Vec<f64>, radius: impl Into<Radius>) -> Self {
        Self {
            count,
            center,
            radius: radius.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.center.is_empty() {
            return Err(Error::InvalidConfig(
                "cluster center must have at least one axis".into(),
            ));
        }
        if self.center.iter().any(|c| !c.is_finite()) {
            return Err(Error::InvalidConfig("cluster center must be finite".into()));
        }
        match &self.radius {
            Radius::Isotropic(r) if !r.is_finite() => {
                Err(Error::InvalidConfig(format!("radius {r} is not finite")))
            }
            Radius::PerAxis(r) if r.len() != self.center.len() => Err(Error::ShapeMismatch {
                expected: self.center.len(),
                actual: r.len(),
            }),
            Radius::PerAxis(r) if r.iter().any(|x| !x.is_finite()) => Err(Error::InvalidConfig(
                "per-axis radius must be finite".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Compute `normal(count, d) * radius + center`.
    pub fn generate(&self, rng: &mut dyn Rng) -> Result<PointSet> {
        self.validate()?;

        let dim = self.center.len();
        let mut out = random::normal(self.count, dim, rng);
        for row in 0..self.count {
            for (axis, x) in out.row_mut(row).iter_mut().enumerate() {
                *x = *x * self.radius.on_axis(axis) + self.center[axis];
            }
        }

        trace!(
            "Placed {} points around {:?} with radius {:?}.",
            self.count,
            self.center,
            self.radius
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn zero_radius_collapses_onto_center() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = GaussianClusterSampling::new(17, vec![1.5, -2.0, 3.25], 0.0);
        let pts = s.generate(&mut rng).unwrap();
        assert_eq!(pts.len(), 17);
        for p in pts.rows() {
            assert_eq!(p, &[1.5, -2.0, 3.25]);
        }
    }

    #[test]
    fn per_axis_radius_must_match_center() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = GaussianClusterSampling::new(3, vec![0.0, 0.0], vec![1.0, 1.0, 1.0]);
        assert!(matches!(
            s.generate(&mut rng),
            Err(Error::ShapeMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn rejects_empty_or_non_finite_parameters() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(GaussianClusterSampling::new(3, Vec::new(), 1.0)
            .generate(&mut rng)
            .is_err());
        assert!(GaussianClusterSampling::new(3, vec![0.0], f64::NAN)
            .generate(&mut rng)
            .is_err());
    }

    #[test]
    fn negative_radius_mirrors_through_center() {
        let center = vec![4.0, -1.0];
        let pos = GaussianClusterSampling::new(32, center.clone(), 0.5)
            .generate(&mut StdRng::seed_from_u64(77))
            .unwrap();
        let neg = GaussianClusterSampling::new(32, center.clone(), -0.5)
            .generate(&mut StdRng::seed_from_u64(77))
            .unwrap();

        for (p, n) in pos.rows().zip(neg.rows()) {
            for axis in 0..2 {
                let dp = p[axis] - center[axis];
                let dn = n[axis] - center[axis];
                assert!((dp + dn).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn per_axis_radius_scales_each_axis() {
        // Zero spread on the second axis pins it to the center.
        let s = GaussianClusterSampling::new(50, vec![0.0, 7.0], vec![2.0, 0.0]);
        let pts = s.generate(&mut StdRng::seed_from_u64(5)).unwrap();
        assert!(pts.column(1).all(|y| y == 7.0));
        assert!(pts.column(0).any(|x| x != 0.0));
    }

    #[test]
    fn determinism_for_same_seed() {
        let s = GaussianClusterSampling::new(20, vec![0.0, 0.0, 0.0], 1.0);
        let a = s.generate(&mut StdRng::seed_from_u64(123)).unwrap();
        let b = s.generate(&mut StdRng::seed_from_u64(123)).unwrap();
        let c = s.generate(&mut StdRng::seed_from_u64(456)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
