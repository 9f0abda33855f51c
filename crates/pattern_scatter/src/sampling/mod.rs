//! Point pattern generators over a d-dimensional region.
//!
//! This module defines the [`PointSampling`] trait and the concrete generators: uniform,
//! regular (optionally jittered) grid, single Gaussian cluster, and the two-level
//! parent-daughter cluster processes.
use rand::Rng;

use crate::error::Result;
use crate::points::PointSet;
use crate::region::Region;

pub mod cluster;
pub mod gaussian;
pub mod grid;
pub mod uniform;

pub use cluster::{
    ClusterProcess, ClusteredPattern, CustomClusterProcess, DaughterCountDistribution,
    DaughterCountKind, DaughterCounts, NormalDaughters, PoissonDaughters, ThomasProcess,
};
pub use gaussian::{GaussianClusterSampling, Radius};
pub use grid::{GridPattern, RegularGridSampling};
pub use uniform::UniformSampling;

/// Trait for generators that fill a region with points.
pub trait PointSampling: Send + Sync {
    fn sample_points(&self, region: &Region, rng: &mut dyn Rng) -> Result<PointSet>;
}
