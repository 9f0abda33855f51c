//! Row-major point matrices produced by every sampler.
use mint::Vector2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An `n x d` matrix of real coordinates, one row per point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawPointSet", into = "RawPointSet")
)]
pub struct PointSet {
    dim: usize,
    coords: Vec<f64>,
}

/// Serialized form of [`PointSet`], checked through [`PointSet::from_flat`] on the way in.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct RawPointSet {
    dim: usize,
    coords: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPointSet> for PointSet {
    type Error = Error;

    fn try_from(raw: RawPointSet) -> Result<Self> {
        Self::from_flat(raw.dim, raw.coords)
    }
}

#[cfg(feature = "serde")]
impl From<PointSet> for RawPointSet {
    fn from(set: PointSet) -> Self {
        Self {
            dim: set.dim,
            coords: set.coords,
        }
    }
}

impl PointSet {
    /// Empty set of `dim`-dimensional points.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            coords: Vec::new(),
        }
    }

    /// Empty set with room for `rows` points.
    pub fn with_capacity(dim: usize, rows: usize) -> Self {
        Self {
            dim,
            coords: Vec::with_capacity(dim * rows),
        }
    }

    /// `rows` points at the origin.
    pub fn zeros(rows: usize, dim: usize) -> Self {
        Self {
            dim,
            coords: vec![0.0; rows * dim],
        }
    }

    /// Wrap a flat row-major buffer. The buffer length must be a multiple of `dim`.
    pub fn from_flat(dim: usize, coords: Vec<f64>) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidConfig(
                "point dimensionality must be at least 1".into(),
            ));
        }
        if coords.len() % dim != 0 {
            return Err(Error::InvalidConfig(format!(
                "buffer of {} coordinates is not a whole number of {}-dimensional points",
                coords.len(),
                dim
            )));
        }
        Ok(Self { dim, coords })
    }

    /// Build from individual rows, all of which must share the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(Error::InvalidConfig(
                "cannot infer dimensionality from zero rows".into(),
            ));
        };
        let mut set = Self::with_capacity(first.as_ref().len(), rows.len());
        for row in rows {
            set.push_row(row.as_ref())?;
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.coords.len() / self.dim
        }
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Coordinates of point `index`. Panics if out of range.
    pub fn row(&self, index: usize) -> &[f64] {
        &self.coords[index * self.dim..(index + 1) * self.dim]
    }

    pub fn row_mut(&mut self, index: usize) -> &mut [f64] {
        &mut self.coords[index * self.dim..(index + 1) * self.dim]
    }

    /// Iterate over rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.coords.chunks_exact(self.dim.max(1))
    }

    /// Coordinates of every point along `axis`.
    pub fn column(&self, axis: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows().map(move |row| row[axis])
    }

    pub fn push_row(&mut self, row: &[f64]) -> Result<()> {
        if row.len() != self.dim {
            return Err(Error::ShapeMismatch {
                expected: self.dim,
                actual: row.len(),
            });
        }
        self.coords.extend_from_slice(row);
        Ok(())
    }

    /// Append every row of `other` after the existing rows.
    pub fn append(&mut self, other: &PointSet) -> Result<()> {
        if other.dim != self.dim {
            return Err(Error::ShapeMismatch {
                expected: self.dim,
                actual: other.dim,
            });
        }
        self.coords.extend_from_slice(&other.coords);
        Ok(())
    }

    /// The flat row-major coordinate buffer.
    pub fn as_flat(&self) -> &[f64] {
        &self.coords
    }

    pub fn as_flat_mut(&mut self) -> &mut [f64] {
        &mut self.coords
    }

    pub fn into_flat(self) -> Vec<f64> {
        self.coords
    }

    /// Convert a 2D set into mint vectors.
    pub fn to_vec2(&self) -> Result<Vec<Vector2<f64>>> {
        if self.dim != 2 {
            return Err(Error::ShapeMismatch {
                expected: 2,
                actual: self.dim,
            });
        }
        Ok(self.rows().map(|r| Vector2 { x: r[0], y: r[1] }).collect())
    }
}
