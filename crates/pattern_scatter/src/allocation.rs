//! Exact allocation of a fixed total sample size across clusters.
//!
//! Raw per-cluster weights are made positive, normalized, scaled by the total and rounded
//! independently. The rounding error is then spread back over the clusters in index
//! order so the counts always sum to the requested total.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// How raw weights are made strictly positive before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PositivityShift {
    /// Add 1 to every zero weight; other weights are untouched. Negative weights are rejected.
    IncrementZeros,
    /// If any weight is <= 0, shift all weights so the minimum becomes exactly 1.
    ShiftToOne,
}

impl PositivityShift {
    /// Apply the shift in place.
    pub fn apply(self, weights: &mut [f64]) -> Result<()> {
        match self {
            PositivityShift::IncrementZeros => {
                if let Some(w) = weights.iter().find(|&&w| w < 0.0) {
                    return Err(Error::InvalidConfig(format!(
                        "negative weight {w} cannot be made positive by incrementing zeros"
                    )));
                }
                for w in weights.iter_mut().filter(|w| **w == 0.0) {
                    *w += 1.0;
                }
            }
            PositivityShift::ShiftToOne => {
                let min = weights.iter().copied().fold(f64::INFINITY, f64::min);
                if min <= 0.0 {
                    let shift = 1.0 - min;
                    for w in weights.iter_mut() {
                        *w += shift;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Allocate `total` points across `raw_weights.len()` clusters in proportion to the weights.
///
/// The result always sums to `total`. Each entry stays within one bulk step of its
/// independently rounded share; when `total` is smaller than the number of clusters an
/// entry can end up zero or negative, and is returned as-is rather than clamped.
pub fn allocate_counts(
    raw_weights: &[f64],
    total: usize,
    shift: PositivityShift,
) -> Result<Vec<i64>> {
    if raw_weights.is_empty() {
        return Err(Error::InvalidConfig(
            "cannot allocate across zero clusters".into(),
        ));
    }
    if let Some(w) = raw_weights.iter().find(|w| !w.is_finite()) {
        return Err(Error::InvalidConfig(format!("raw weight {w} is not finite")));
    }

    let mut weights = raw_weights.to_vec();
    shift.apply(&mut weights)?;

    let sum: f64 = weights.iter().sum();
    // Normalize first, then scale by the total.
    let mut counts: Vec<i64> = weights
        .iter()
        .map(|w| ((w / sum) * total as f64).round() as i64)
        .collect();

    let error = counts.iter().sum::<i64>() - total as i64;
    if error != 0 {
        distribute_correction(&mut counts, error);
        debug!(
            "Corrected rounding error of {} across {} clusters.",
            error,
            counts.len()
        );
    }

    if counts.iter().any(|&c| c < 0) {
        warn!(
            "Allocation of {} points across {} clusters produced negative counts.",
            total,
            counts.len()
        );
    }

    Ok(counts)
}

/// Subtract `error` from `counts`: every cluster takes `|error| / k`, and the first
/// `|error| % k` clusters take one more.
fn distribute_correction(counts: &mut [i64], error: i64) {
    let k = counts.len() as i64;
    let magnitude = error.abs();
    let bulk = magnitude / k;
    let extra = (magnitude - bulk * k) as usize;
    let sign = -error.signum();

    for (index, count) in counts.iter_mut().enumerate() {
        let step = if index < extra { bulk + 1 } else { bulk };
        *count += sign * step;
    }
}
