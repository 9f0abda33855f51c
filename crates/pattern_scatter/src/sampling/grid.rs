//! Regular grid sampling with optional Gaussian jitter.
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::points::PointSet;
use crate::random;
use crate::region::Region;
use crate::sampling::PointSampling;

/// Regular lattice sized to approximate a target point count.
///
/// The spacing `s = (volume / target_count)^(1/d)` is shared by all axes and each axis gets
/// `round(extent / s)` points (at least one), spread evenly from its min to its max bound.
/// The realized count is the product of the per-axis counts and may differ from the target.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegularGridSampling {
    /// Desired number of points.
    pub target_count: usize,
    /// Standard deviation of the per-coordinate Gaussian jitter; `None` keeps the exact grid.
    pub jitter_stdev: Option<f64>,
}

/// Output of [`RegularGridSampling::generate`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridPattern {
    /// Grid points, last axis varying fastest.
    pub points: PointSet,
    /// Spacing used to size the grid.
    pub spacing: f64,
    /// Number of points along each axis.
    pub shape: Vec<usize>,
}

impl RegularGridSampling {
    /// Exact grid without jitter.
    pub fn new(target_count: usize) -> Self {
        Self {
            target_count,
            jitter_stdev: None,
        }
    }

    /// Perturb every coordinate with N(0, stdev^2) noise (builder-style).
    pub fn with_jitter(mut self, stdev: f64) -> Self {
        self.jitter_stdev = Some(stdev);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_count == 0 {
            return Err(Error::InvalidConfig("target_count must be > 0".into()));
        }
        if let Some(s) = self.jitter_stdev {
            if !s.is_finite() || s < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "jitter_stdev must be finite and >= 0, got {s}"
                )));
            }
        }
        Ok(())
    }

    /// Per-axis point counts and the spacing they were derived from.
    pub fn solve_shape(&self, region: &Region) -> Result<(Vec<usize>, f64)> {
        self.validate()?;

        let dim = region.dim();
        let spacing = (region.volume() / self.target_count as f64).powf(1.0 / dim as f64);
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "region yields unusable grid spacing {spacing}"
            )));
        }

        let shape = (0..dim)
            .map(|axis| ((region.extent(axis) / spacing).round() as usize).max(1))
            .collect();
        Ok((shape, spacing))
    }

    pub fn generate(&self, region: &Region, rng: &mut dyn Rng) -> Result<GridPattern> {
        let (shape, spacing) = self.solve_shape(region)?;
        let total = shape
            .iter()
            .try_fold(1usize, |acc, &m| acc.checked_mul(m))
            .ok_or_else(|| Error::InvalidConfig("grid point count overflows usize".into()))?;

        let dim = region.dim();
        let axes: Vec<Vec<f64>> = (0..dim)
            .map(|axis| linspace(region.min(axis), region.max(axis), shape[axis]))
            .collect();

        let mut points = PointSet::zeros(total, dim);
        for index in 0..total {
            let row = points.row_mut(index);
            let mut rem = index;
            for axis in (0..dim).rev() {
                row[axis] = axes[axis][rem % shape[axis]];
                rem /= shape[axis];
            }
        }

        if let Some(stdev) = self.jitter_stdev {
            let noise = random::normal(total, dim, rng);
            for (x, z) in points.as_flat_mut().iter_mut().zip(noise.as_flat()) {
                *x += z * stdev;
            }
        }

        if total != self.target_count {
            warn!(
                "Grid of shape {:?} has {} points; requested {}.",
                shape, total, self.target_count
            );
        }
        debug!(
            "Built grid of shape {:?} with spacing {} (jitter {:?}).",
            shape, spacing, self.jitter_stdev
        );

        Ok(GridPattern {
            points,
            spacing,
            shape,
        })
    }
}

impl PointSampling for RegularGridSampling {
    fn sample_points(&self, region: &Region, rng: &mut dyn Rng) -> Result<PointSet> {
        self.generate(region, rng).map(|grid| grid.points)
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive; a single value sits at `start`.
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count <= 1 {
        return vec![start];
    }
    let step = (end - start) / (count - 1) as f64;
    (0..count)
        .map(|i| {
            if i == count - 1 {
                end
            } else {
                start + i as f64 * step
            }
        })
        .collect()
}
