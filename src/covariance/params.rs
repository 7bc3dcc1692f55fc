//! Matérn covariance parameters `[smoothness, range, variance, nugget]`.
//!
//! The parameter vector follows the fixed ordering used by the host
//! environment: `ν` (smoothness), `ϕ` (range), `σ²` (partial sill /
//! variance) and `τ²` (nugget). [`MaternParams`] is the validated form of
//! that vector; once constructed, every accessor returns a finite value
//! with `ν > 0`, `ϕ > 0`, `σ² ≥ 0`, `τ² ≥ 0`.
use crate::covariance::errors::{MaternError, MaternResult};

/// Number of entries in a raw covariance parameter vector.
pub const N_PARAMS: usize = 4;

/// Validated Matérn covariance parameters.
///
/// Fields
/// ------
/// - `smoothness`: `ν > 0`, controls mean-square differentiability.
/// - `range`: `ϕ > 0`, length scale in distance units.
/// - `variance`: `σ² ≥ 0`, partial sill.
/// - `nugget`: `τ² ≥ 0`, added only at zero distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaternParams {
    smoothness: f64,
    range: f64,
    variance: f64,
    nugget: f64,
}

impl MaternParams {
    /// Build parameters from their components.
    ///
    /// # Errors
    /// - [`MaternError::InvalidSmoothness`] if `smoothness` is not finite or `<= 0`.
    /// - [`MaternError::InvalidRange`] if `range` is not finite or `<= 0`.
    /// - [`MaternError::InvalidVariance`] if `variance` is not finite or `< 0`.
    /// - [`MaternError::InvalidNugget`] if `nugget` is not finite or `< 0`.
    pub fn new(smoothness: f64, range: f64, variance: f64, nugget: f64) -> MaternResult<Self> {
        if !smoothness.is_finite() || smoothness <= 0.0 {
            return Err(MaternError::InvalidSmoothness { value: smoothness });
        }
        if !range.is_finite() || range <= 0.0 {
            return Err(MaternError::InvalidRange { value: range });
        }
        if !variance.is_finite() || variance < 0.0 {
            return Err(MaternError::InvalidVariance { value: variance });
        }
        if !nugget.is_finite() || nugget < 0.0 {
            return Err(MaternError::InvalidNugget { value: nugget });
        }
        Ok(MaternParams { smoothness, range, variance, nugget })
    }

    /// Parse a raw parameter vector `[ν, ϕ, σ², τ²]`.
    ///
    /// # Errors
    /// Returns [`MaternError::InvalidParameterCount`] unless
    /// `covparms.len() == 4`, then the same errors as [`MaternParams::new`].
    pub fn from_slice(covparms: &[f64]) -> MaternResult<Self> {
        match *covparms {
            [smoothness, range, variance, nugget] => {
                Self::new(smoothness, range, variance, nugget)
            }
            _ => Err(MaternError::InvalidParameterCount { len: covparms.len() }),
        }
    }

    pub fn smoothness(&self) -> f64 {
        self.smoothness
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn nugget(&self) -> f64 {
        self.nugget
    }

    /// Covariance at zero distance, `σ² + τ²`.
    pub fn sill(&self) -> f64 {
        self.variance + self.nugget
    }

    /// Parameters back in host ordering `[ν, ϕ, σ², τ²]`.
    pub fn to_array(&self) -> [f64; N_PARAMS] {
        [self.smoothness, self.range, self.variance, self.nugget]
    }
}

impl TryFrom<&[f64]> for MaternParams {
    type Error = MaternError;

    fn try_from(covparms: &[f64]) -> MaternResult<Self> {
        MaternParams::from_slice(covparms)
    }
}
