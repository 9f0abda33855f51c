#![forbid(unsafe_code)]
//! pattern_scatter: synthetic spatial point patterns for simulation and testing.
//!
//! Modules:
//! - region / points: axis-aligned sampling domains and row-major point matrices
//! - random: seeded uniform, normal and Poisson primitives
//! - allocation: exact split of a fixed point budget across clusters
//! - sampling: uniform, regular grid, Gaussian cluster and parent-daughter processes
//!
//! Every generator takes the random generator explicitly, so a seed reproduces a pattern
//! bit for bit.
pub mod allocation;
pub mod error;
pub mod points;
pub mod random;
pub mod region;
pub mod sampling;

/// Convenient re-exports for common types. Import with `use pattern_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::allocation::{allocate_counts, PositivityShift};
    pub use crate::error::{Error, Result};
    pub use crate::points::PointSet;
    pub use crate::random::rng_from_seed;
    pub use crate::region::Region;
    pub use crate::sampling::{
        ClusterProcess, ClusteredPattern, CustomClusterProcess, DaughterCountDistribution,
        DaughterCountKind, DaughterCounts, GaussianClusterSampling, GridPattern,
        NormalDaughters, PointSampling, PoissonDaughters, Radius, RegularGridSampling,
        ThomasProcess, UniformSampling,
    };
}
