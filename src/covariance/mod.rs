//! covariance — Matérn covariance matrices from pairwise distances.
//!
//! Purpose
//! -------
//! Turn a matrix of pairwise distances and a host-ordered parameter vector
//! `[smoothness ν, range ϕ, variance σ², nugget τ²]` into the matching
//! Matérn covariance matrix, as consumed by Gaussian-process style callers.
//!
//! Key behaviors
//! -------------
//! - Validate parameters ([`MaternParams`]) and options ([`MaternOptions`])
//!   up front; reject or propagate bad distances per [`DistancePolicy`].
//! - Classify `ν` once into a [`Smoothness`] tag and dispatch each entry to
//!   the matching closed form or to the log-domain Bessel expression.
//! - Evaluate entries sequentially or in parallel ([`Execution`]) with
//!   identical results.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output shape equals input shape, zero distances map to `σ² + τ²`, and
//!   all other entries lie in `[0, σ²]` for valid inputs.
//! - Errors are reported via [`MaternError`]; the functions never panic on
//!   user input.
//!
//! Conventions
//! -----------
//! - Matrices are `ndarray` 2-D arrays; inputs are borrowed as views and
//!   outputs are freshly allocated.
//! - Distances are in the same units as the range `ϕ`.
//!
//! Downstream usage
//! ----------------
//! - `use matern_cov::covariance::prelude::*;` brings in the main surface.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; `tests/` holds an end-to-end
//!   pipeline test through the public API.

pub mod errors;
pub mod matern;
pub mod options;
pub mod params;
pub mod smoothness;
pub mod validation;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{MaternError, MaternResult};
pub use self::matern::{MaternKernel, matern_cov, matern_cov_with_options};
pub use self::options::{DistancePolicy, Execution, MaternOptions};
pub use self::params::MaternParams;
pub use self::smoothness::Smoothness;

pub mod prelude {
    pub use super::errors::{MaternError, MaternResult};
    pub use super::matern::{MaternKernel, matern_cov, matern_cov_with_options};
    pub use super::options::{DistancePolicy, Execution, MaternOptions};
    pub use super::params::MaternParams;
}
