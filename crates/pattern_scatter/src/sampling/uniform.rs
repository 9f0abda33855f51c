//! Uniform (homogeneous Poisson) point sampling.
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::points::PointSet;
use crate::random;
use crate::region::Region;
use crate::sampling::PointSampling;

/// Uniform i.i.d. random sampling over an axis-aligned region.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UniformSampling {
    /// Number of points to generate.
    pub count: usize,
}

impl UniformSampling {
    /// Create a new uniform sampler that generates `count` points.
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Draw `count` points in `[min, max)` on every axis of `region`.
    pub fn generate(&self, region: &Region, rng: &mut dyn Rng) -> PointSet {
        let mut out = random::uniform(self.count, region.dim(), rng);

        for axis in 0..region.dim() {
            let min = region.min(axis);
            let extent = region.extent(axis);
            // Keep strictly inside the upper edge.
            let max = region.max(axis).next_down();
            for row in 0..self.count {
                let x = &mut out.row_mut(row)[axis];
                *x = (*x * extent + min).clamp(min, max);
            }
        }

        debug!(
            "Sampled {} uniform points in {} dimensions.",
            self.count,
            region.dim()
        );
        out
    }
}

impl PointSampling for UniformSampling {
    fn sample_points(&self, region: &Region, rng: &mut dyn Rng) -> Result<PointSet> {
        Ok(self.generate(region, rng))
    }
}
