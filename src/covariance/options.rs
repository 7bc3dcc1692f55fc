//! Options controlling a Matérn covariance evaluation.
//!
//! [`MaternOptions`] bundles the knobs that are not part of the covariance
//! parameters themselves:
//! - `half_integer_tol`: how close `ν` must be to 0.5, 1.5 or 2.5 to use the
//!   closed forms.
//! - `distance_policy`: what to do with negative or non-finite distances.
//! - `execution`: sequential or rayon-parallel evaluation over entries.
//!
//! Defaults (`MaternOptions::default()`): tolerance `1e-10`,
//! [`DistancePolicy::Reject`], [`Execution::Sequential`].
use crate::covariance::errors::{MaternError, MaternResult};

/// Default tolerance when matching `ν` against the half-integer closed forms.
pub const DEFAULT_HALF_INTEGER_TOL: f64 = 1e-10;

/// Exclusive upper bound on the half-integer tolerance. Wider windows would
/// replace the general kernel for visibly different `ν`.
pub const MAX_HALF_INTEGER_TOL: f64 = 1e-3;

/// Handling of distance entries outside `[0, ∞)`.
///
/// - `Reject`: scan the whole matrix first and fail with the first offending
///   entry (row-major order). Nothing is computed on failure.
/// - `Propagate`: evaluate every entry; NaN and negative distances map to
///   NaN, `+∞` maps to a covariance of `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistancePolicy {
    #[default]
    Reject,
    Propagate,
}

/// Execution strategy for the elementwise loop.
///
/// Both strategies evaluate the same scalar kernel on each entry, so their
/// outputs are identical bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    #[default]
    Sequential,
    Parallel,
}

/// Validated evaluation options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaternOptions {
    half_integer_tol: f64,
    distance_policy: DistancePolicy,
    execution: Execution,
}

impl MaternOptions {
    /// Build options.
    ///
    /// # Errors
    /// Returns [`MaternError::InvalidTolerance`] if `half_integer_tol` is not
    /// finite or lies outside `[0, MAX_HALF_INTEGER_TOL)`.
    pub fn new(
        half_integer_tol: f64, distance_policy: DistancePolicy, execution: Execution,
    ) -> MaternResult<Self> {
        if !half_integer_tol.is_finite() || !(0.0..MAX_HALF_INTEGER_TOL).contains(&half_integer_tol) {
            return Err(MaternError::InvalidTolerance { value: half_integer_tol });
        }
        Ok(MaternOptions { half_integer_tol, distance_policy, execution })
    }

    pub fn half_integer_tol(&self) -> f64 {
        self.half_integer_tol
    }

    pub fn distance_policy(&self) -> DistancePolicy {
        self.distance_policy
    }

    pub fn execution(&self) -> Execution {
        self.execution
    }

    /// Same options with a different distance policy.
    pub fn with_distance_policy(mut self, distance_policy: DistancePolicy) -> Self {
        self.distance_policy = distance_policy;
        self
    }

    /// Same options with a different execution strategy.
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }
}

impl Default for MaternOptions {
    fn default() -> Self {
        MaternOptions {
            half_integer_tol: DEFAULT_HALF_INTEGER_TOL,
            distance_policy: DistancePolicy::default(),
            execution: Execution::default(),
        }
    }
}
