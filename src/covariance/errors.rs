//! covariance::errors — error type for Matérn covariance evaluation.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by parameter parsing,
//! option validation, distance validation, and kernel evaluation, together
//! with the conversion to Python exceptions used by the PyO3 bindings.
//!
//! Conventions
//! -----------
//! - Every variant carries the offending value (and, for distances, its
//!   0-based `(row, col)` position) so that messages are self-contained.
//! - Messages are phrased in terms of domain constraints ("range must be
//!   positive") rather than low-level details.
//! - All validation errors are raised before any covariance entry is
//!   computed; no partially filled matrix is ever returned.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for Matérn covariance operations.
pub type MaternResult<T> = Result<T, MaternError>;

/// MaternError — failures raised while preparing a Matérn covariance call.
///
/// Variants
/// --------
/// - `InvalidParameterCount { len }`
///   The parameter vector does not hold exactly four entries
///   `[smoothness, range, variance, nugget]`.
/// - `InvalidSmoothness { value }` / `InvalidRange { value }`
///   `ν` or `ϕ` is non-finite or not strictly positive.
/// - `InvalidVariance { value }` / `InvalidNugget { value }`
///   `σ²` or `τ²` is non-finite or negative.
/// - `NonFiniteDistance { row, col, value }` / `NegativeDistance { row, col, value }`
///   A distance entry is NaN/±∞ or negative while the rejecting distance
///   policy is active.
/// - `InvalidTolerance { value }`
///   The half-integer matching tolerance lies outside `[0, 1e-3)`.
///
/// Notes
/// -----
/// - Numerical underflow of tiny covariances is not an error; it is logged
///   and the (zero or subnormal) value is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum MaternError {
    // ---- Parameter vector ----
    InvalidParameterCount { len: usize },
    InvalidSmoothness { value: f64 },
    InvalidRange { value: f64 },
    InvalidVariance { value: f64 },
    InvalidNugget { value: f64 },

    // ---- Distance matrix ----
    NonFiniteDistance { row: usize, col: usize, value: f64 },
    NegativeDistance { row: usize, col: usize, value: f64 },

    // ---- Options ----
    InvalidTolerance { value: f64 },
}

impl std::error::Error for MaternError {}

impl std::fmt::Display for MaternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaternError::InvalidParameterCount { len } => write!(
                f,
                "Expected 4 covariance parameters [smoothness, range, variance, nugget], got {len}."
            ),
            MaternError::InvalidSmoothness { value } => {
                write!(f, "Invalid smoothness {value}. Must be finite and positive.")
            }
            MaternError::InvalidRange { value } => {
                write!(f, "Invalid range {value}. Must be finite and positive.")
            }
            MaternError::InvalidVariance { value } => {
                write!(f, "Invalid variance {value}. Must be finite and non-negative.")
            }
            MaternError::InvalidNugget { value } => {
                write!(f, "Invalid nugget {value}. Must be finite and non-negative.")
            }
            MaternError::NonFiniteDistance { row, col, value } => {
                write!(f, "Non-finite distance {value} at ({row}, {col}).")
            }
            MaternError::NegativeDistance { row, col, value } => {
                write!(f, "Negative distance {value} at ({row}, {col}).")
            }
            MaternError::InvalidTolerance { value } => {
                write!(f, "Invalid half-integer tolerance {value}. Must satisfy 0 ≤ tol < 1e-3.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<MaternError> for PyErr {
    fn from(err: MaternError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
