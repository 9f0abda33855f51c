//! Axis-aligned bounding regions that define the sampling domain.
use mint::Vector2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An axis-aligned box in `d >= 1` dimensions, stored as one `[min, max]` pair per axis.
///
/// Every bound and every extent is finite and `min < max` holds on every axis. This is
/// checked on construction, including deserialization, so samplers can rely on positive
/// extents.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")
)]
pub struct Region {
    bounds: Vec<[f64; 2]>,
}

impl Region {
    /// Build a region from per-axis `[min, max]` pairs.
    pub fn new(bounds: Vec<[f64; 2]>) -> Result<Self> {
        if bounds.is_empty() {
            return Err(Error::InvalidConfig(
                "region must have at least one axis".into(),
            ));
        }
        for (axis, &[min, max]) in bounds.iter().enumerate() {
            let extent = max - min;
            if !min.is_finite() || !max.is_finite() || min >= max || !extent.is_finite() {
                return Err(Error::InvalidRegion { axis, min, max });
            }
        }
        Ok(Self { bounds })
    }

    /// Build a region from a slice of `[min, max]` rows.
    pub fn from_rows(rows: &[[f64; 2]]) -> Result<Self> {
        Self::new(rows.to_vec())
    }

    /// The unit hypercube `[0, 1]^dim`.
    pub fn unit(dim: usize) -> Result<Self> {
        Self::new(vec![[0.0, 1.0]; dim])
    }

    /// A 2D region of the given extent centered on the origin.
    pub fn from_extent(extent: impl Into<Vector2<f64>>) -> Result<Self> {
        let extent = extent.into();
        let half_w = extent.x * 0.5;
        let half_h = extent.y * 0.5;
        Self::new(vec![[-half_w, half_w], [-half_h, half_h]])
    }

    /// Number of axes.
    pub fn dim(&self) -> usize {
        self.bounds.len()
    }

    pub fn bounds(&self) -> &[[f64; 2]] {
        &self.bounds
    }

    pub fn min(&self, axis: usize) -> f64 {
        self.bounds[axis][0]
    }

    pub fn max(&self, axis: usize) -> f64 {
        self.bounds[axis][1]
    }

    /// Length of the region along `axis`.
    pub fn extent(&self, axis: usize) -> f64 {
        self.bounds[axis][1] - self.bounds[axis][0]
    }

    /// Product of all per-axis extents.
    pub fn volume(&self) -> f64 {
        (0..self.dim()).map(|axis| self.extent(axis)).product()
    }

    /// Whether `point` lies in the half-open box `[min, max)` on every axis.
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.dim()
            && point
                .iter()
                .zip(&self.bounds)
                .all(|(&x, &[min, max])| x >= min && x < max)
    }
}

impl TryFrom<Vec<[f64; 2]>> for Region {
    type Error = Error;

    fn try_from(bounds: Vec<[f64; 2]>) -> Result<Self> {
        Self::new(bounds)
    }
}

impl From<Region> for Vec<[f64; 2]> {
    fn from(region: Region) -> Self {
        region.bounds
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;

    #[test]
    fn rejects_empty_and_degenerate_bounds() {
        assert!(matches!(
            Region::new(Vec::new()),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Region::from_rows(&[[0.0, 1.0], [2.0, 2.0]]),
            Err(Error::InvalidRegion { axis: 1, .. })
        ));
        assert!(matches!(
            Region::from_rows(&[[3.0, -1.0]]),
            Err(Error::InvalidRegion { axis: 0, .. })
        ));
        assert!(matches!(
            Region::from_rows(&[[0.0, f64::INFINITY]]),
            Err(Error::InvalidRegion { .. })
        ));
        assert!(matches!(
            Region::from_rows(&[[f64::NAN, 1.0]]),
            Err(Error::InvalidRegion { .. })
        ));
    }

    #[test]
    fn rejects_finite_bounds_with_overflowing_extent() {
        assert!(matches!(
            Region::from_rows(&[[0.0, 1.0], [-1e308, 1e308]]),
            Err(Error::InvalidRegion { axis: 1, .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_validates_bounds() {
        let region: Region = serde_json::from_str("[[0.0, 2.0], [-1.0, 1.0]]").unwrap();
        assert_eq!(region.volume(), 4.0);
        let json = serde_json::to_string(&region).unwrap();
        assert_eq!(serde_json::from_str::<Region>(&json).unwrap(), region);

        assert!(serde_json::from_str::<Region>("[[5.0, 1.0]]").is_err());
        assert!(serde_json::from_str::<Region>("[]").is_err());
    }

    #[test]
    fn extents_and_volume() {
        let region = Region::from_rows(&[[0.0, 10.0], [-2.0, 2.0], [1.0, 1.5]]).unwrap();
        assert_eq!(region.dim(), 3);
        assert_eq!(region.extent(0), 10.0);
        assert_eq!(region.extent(1), 4.0);
        assert_eq!(region.volume(), 20.0);
    }

    #[test]
    fn from_extent_is_centered_on_origin() {
        let region = Region::from_extent(DVec2::new(8.0, 6.0)).unwrap();
        assert_eq!(region.bounds(), &[[-4.0, 4.0], [-3.0, 3.0]]);
        assert!(Region::from_extent(DVec2::new(0.0, 6.0)).is_err());
    }

    #[test]
    fn contains_is_half_open() {
        let region = Region::unit(2).unwrap();
        assert!(region.contains(&[0.0, 0.5]));
        assert!(!region.contains(&[1.0, 0.5]));
        assert!(!region.contains(&[0.5]));
    }
}
