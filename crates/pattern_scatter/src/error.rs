//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid regions, dimensionality mismatches, wrong distribution parameter counts,
//! allocation underflow in cluster processes, and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid region on axis {axis}: bounds [{min}, {max}] must be finite with min < max")]
    InvalidRegion { axis: usize, min: f64, max: f64 },

    #[error("shape mismatch: expected dimensionality {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("wrong number of distribution parameters: expected {expected}, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },

    #[error("cluster {cluster} was allocated {count} points; total is too small for the cluster count")]
    AllocationUnderflow { cluster: usize, count: i64 },

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
