//! Two-level parent-daughter cluster processes.
//!
//! Parent centers are placed uniformly in the region. Each cluster then receives a share
//! of a fixed total point budget in proportion to a random raw weight, and its daughter
//! points are drawn from an isotropic Gaussian around the parent with a randomly drawn
//! radius. The variants differ only in the distribution of the raw weights:
//!
//! - [`ThomasProcess`]: Poisson weights with rate `lambda`.
//! - [`CustomClusterProcess`]: standard normal weights.
use std::fmt::Debug;
use std::ops::Range;

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::allocation::{allocate_counts, PositivityShift};
use crate::error::{Error, Result};
use crate::points::PointSet;
use crate::random;
use crate::region::Region;
use crate::sampling::gaussian::GaussianClusterSampling;
use crate::sampling::uniform::UniformSampling;
use crate::sampling::PointSampling;

/// Distribution of the raw per-cluster weights that set relative cluster sizes.
pub trait DaughterCountDistribution: Debug + Send + Sync {
    /// Check parameters before any draw.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// One raw weight per cluster.
    fn draw_raw_weights(&self, n_clusters: usize, rng: &mut dyn Rng) -> Vec<f64>;

    /// How non-positive weights are lifted before allocation.
    fn positivity_shift(&self) -> PositivityShift;
}

/// Poisson-distributed raw weights (Thomas-style process).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoissonDaughters {
    /// Poisson rate of the per-cluster weight.
    pub lambda: f64,
}

impl DaughterCountDistribution for PoissonDaughters {
    fn validate(&self) -> Result<()> {
        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "lambda must be finite and >= 0, got {}",
                self.lambda
            )));
        }
        Ok(())
    }

    fn draw_raw_weights(&self, n_clusters: usize, rng: &mut dyn Rng) -> Vec<f64> {
        (0..n_clusters)
            .map(|_| random::poisson_count(self.lambda, rng) as f64)
            .collect()
    }

    fn positivity_shift(&self) -> PositivityShift {
        PositivityShift::IncrementZeros
    }
}

/// Standard normal raw weights.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NormalDaughters;

impl DaughterCountDistribution for NormalDaughters {
    fn draw_raw_weights(&self, n_clusters: usize, rng: &mut dyn Rng) -> Vec<f64> {
        random::normal(n_clusters, 1, rng).into_flat()
    }

    fn positivity_shift(&self) -> PositivityShift {
        PositivityShift::ShiftToOne
    }
}

/// Selector for [`DaughterCounts::from_params`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DaughterCountKind {
    Poisson,
    Normal,
}

/// Weight distribution chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DaughterCounts {
    Poisson(PoissonDaughters),
    Normal(NormalDaughters),
}

impl DaughterCounts {
    /// Build from a positional parameter list: Poisson takes `[lambda]`, normal takes none.
    pub fn from_params(kind: DaughterCountKind, params: &[f64]) -> Result<Self> {
        let expected = match kind {
            DaughterCountKind::Poisson => 1,
            DaughterCountKind::Normal => 0,
        };
        if params.len() != expected {
            return Err(Error::ArgumentCount {
                expected,
                actual: params.len(),
            });
        }
        let counts = match kind {
            DaughterCountKind::Poisson => DaughterCounts::Poisson(PoissonDaughters {
                lambda: params[0],
            }),
            DaughterCountKind::Normal => DaughterCounts::Normal(NormalDaughters),
        };
        counts.validate()?;
        Ok(counts)
    }

    pub fn kind(&self) -> DaughterCountKind {
        match self {
            DaughterCounts::Poisson(_) => DaughterCountKind::Poisson,
            DaughterCounts::Normal(_) => DaughterCountKind::Normal,
        }
    }
}

impl DaughterCountDistribution for DaughterCounts {
    fn validate(&self) -> Result<()> {
        match self {
            DaughterCounts::Poisson(d) => d.validate(),
            DaughterCounts::Normal(d) => d.validate(),
        }
    }

    fn draw_raw_weights(&self, n_clusters: usize, rng: &mut dyn Rng) -> Vec<f64> {
        match self {
            DaughterCounts::Poisson(d) => d.draw_raw_weights(n_clusters, rng),
            DaughterCounts::Normal(d) => d.draw_raw_weights(n_clusters, rng),
        }
    }

    fn positivity_shift(&self) -> PositivityShift {
        match self {
            DaughterCounts::Poisson(d) => d.positivity_shift(),
            DaughterCounts::Normal(d) => d.positivity_shift(),
        }
    }
}

/// Parent-daughter cluster process with a fixed total number of points.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterProcess<D> {
    /// Exact number of daughter points in the output.
    pub total_points: usize,
    /// Number of parent centers.
    pub n_clusters: usize,
    /// Distribution of the raw per-cluster weights.
    pub distribution: D,
    /// Mean of the per-cluster radius draw.
    pub radius_mean: f64,
    /// Standard deviation of the per-cluster radius draw.
    pub radius_stdev: f64,
}

/// Cluster process with Poisson cluster sizes.
pub type ThomasProcess = ClusterProcess<PoissonDaughters>;

/// Cluster process with normal cluster sizes.
pub type CustomClusterProcess = ClusterProcess<NormalDaughters>;

impl ThomasProcess {
    pub fn thomas(
        total_points: usize,
        n_clusters: usize,
        lambda: f64,
        radius_mean: f64,
        radius_stdev: f64,
    ) -> Self {
        Self::new(
            total_points,
            n_clusters,
            PoissonDaughters { lambda },
            radius_mean,
            radius_stdev,
        )
    }
}

impl CustomClusterProcess {
    pub fn custom(
        total_points: usize,
        n_clusters: usize,
        radius_mean: f64,
        radius_stdev: f64,
    ) -> Self {
        Self::new(
            total_points,
            n_clusters,
            NormalDaughters,
            radius_mean,
            radius_stdev,
        )
    }
}

/// Output of a cluster process.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusteredPattern {
    /// Daughter points grouped by cluster in ascending cluster order.
    pub points: PointSet,
    /// 1-based cluster label of each point.
    pub labels: Vec<usize>,
    /// Parent center of each cluster.
    pub centers: PointSet,
    /// Gaussian scale used for each cluster.
    pub radii: Vec<f64>,
    /// Number of points allocated to each cluster.
    pub counts: Vec<usize>,
}

impl ClusteredPattern {
    /// Row range holding the points of 1-based cluster `cluster`.
    pub fn cluster_range(&self, cluster: usize) -> Option<Range<usize>> {
        if cluster == 0 || cluster > self.counts.len() {
            return None;
        }
        let start: usize = self.counts[..cluster - 1].iter().sum();
        Some(start..start + self.counts[cluster - 1])
    }
}

impl<D: DaughterCountDistribution> ClusterProcess<D> {
    pub fn new(
        total_points: usize,
        n_clusters: usize,
        distribution: D,
        radius_mean: f64,
        radius_stdev: f64,
    ) -> Self {
        Self {
            total_points,
            n_clusters,
            distribution,
            radius_mean,
            radius_stdev,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_clusters == 0 {
            return Err(Error::InvalidConfig("n_clusters must be > 0".into()));
        }
        if !self.radius_mean.is_finite() || !self.radius_stdev.is_finite() {
            return Err(Error::InvalidConfig(
                "radius_mean and radius_stdev must be finite".into(),
            ));
        }
        self.distribution.validate()
    }

    pub fn generate(&self, region: &Region, rng: &mut dyn Rng) -> Result<ClusteredPattern> {
        self.validate()?;

        let centers = UniformSampling::new(self.n_clusters).generate(region, rng);

        let weights = self.distribution.draw_raw_weights(self.n_clusters, rng);
        let allocated =
            allocate_counts(&weights, self.total_points, self.distribution.positivity_shift())?;
        let counts = allocated
            .iter()
            .enumerate()
            .map(|(index, &count)| {
                usize::try_from(count).map_err(|_| Error::AllocationUnderflow {
                    cluster: index + 1,
                    count,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let radii: Vec<f64> = random::normal(self.n_clusters, 1, rng)
            .into_flat()
            .into_iter()
            .map(|z| z * self.radius_stdev + self.radius_mean)
            .collect();

        let mut points = PointSet::with_capacity(region.dim(), self.total_points);
        let mut labels = Vec::with_capacity(self.total_points);
        for (index, (&count, &radius)) in counts.iter().zip(&radii).enumerate() {
            let cluster = index + 1;
            if count == 0 {
                warn!("Cluster {} received no points.", cluster);
                continue;
            }
            let daughters =
                GaussianClusterSampling::new(count, centers.row(index).to_vec(), radius)
                    .generate(rng)?;
            points.append(&daughters)?;
            labels.extend(std::iter::repeat_n(cluster, count));
            trace!(
                "Cluster {} holds rows {}..{}.",
                cluster,
                labels.len() - count,
                labels.len()
            );
        }

        debug!(
            "Generated {} points in {} clusters ({:?} weights).",
            points.len(),
            self.n_clusters,
            self.distribution.positivity_shift()
        );

        Ok(ClusteredPattern {
            points,
            labels,
            centers,
            radii,
            counts,
        })
    }
}

impl<D: DaughterCountDistribution> PointSampling for ClusterProcess<D> {
    fn sample_points(&self, region: &Region, rng: &mut dyn Rng) -> Result<PointSet> {
        self.generate(region, rng).map(|pattern| pattern.points)
    }
}
