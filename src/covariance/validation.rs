//! covariance::validation — input guards for distance matrices.
//!
//! Purpose
//! -------
//! Check a distance matrix against the rejecting [`DistancePolicy`] before
//! any covariance entry is computed, so that a failing call never returns
//! a partially evaluated matrix.
//!
//! Conventions
//! -----------
//! - Entries are scanned in row-major (logical) order and the first
//!   offending entry is reported with its 0-based `(row, col)` position.
//! - Empty matrices are valid; the kernel maps them to empty outputs.
//!
//! [`DistancePolicy`]: crate::covariance::options::DistancePolicy

use crate::covariance::errors::{MaternError, MaternResult};
use ndarray::ArrayView2;

/// Validate that every distance is finite and non-negative.
///
/// Errors
/// ------
/// - `MaternError::NonFiniteDistance { row, col, value }` for NaN or ±∞.
/// - `MaternError::NegativeDistance { row, col, value }` for `value < 0`.
///   `-0.0` is accepted and treated as zero distance.
pub fn validate_distances(distances: ArrayView2<'_, f64>) -> MaternResult<()> {
    for ((row, col), &value) in distances.indexed_iter() {
        if !value.is_finite() {
            return Err(MaternError::NonFiniteDistance { row, col, value });
        }
        if value < 0.0 {
            return Err(MaternError::NegativeDistance { row, col, value });
        }
    }
    Ok(())
}
