//! matern_cov — Matérn covariance matrices with optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the Matérn covariance kernel to Python via the `_matern_cov`
//! extension module. When the `python-bindings` feature is enabled, this
//! module defines the Python-facing function and submodule.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`covariance` and `special`) as the
//!   public crate surface.
//! - Define the `#[pyfunction]` wrapper and the `#[pymodule]` initializer for
//!   the `_matern_cov` Python extension, registering a `covariance`
//!   submodule so that dot-notation imports work.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, argument conversion, and error mapping.
//! - The kernel itself is pure: no global state, no I/O beyond `log`
//!   records, and no `unsafe` code paths.
//!
//! Conventions
//! -----------
//! - Parameter vectors use the host ordering `[smoothness, range, variance,
//!   nugget]`.
//! - Errors from core Rust code are propagated as [`MaternError`] values and
//!   converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code depends on [`covariance`] directly and can ignore the
//!   items guarded by the `python-bindings` feature.
//! - Python code imports `_matern_cov.covariance.matern_cov`.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   the pipeline test under `tests/`.
//! - The PyO3 layer is exercised from Python; it is not linked into the Rust
//!   test binaries.
//!
//! [`MaternError`]: crate::covariance::MaternError

pub mod covariance;
pub mod special;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    covariance::matern::matern_cov_with_options,
    utils::{extract_f64_array, extract_f64_matrix, extract_matern_options},
};

/// matern_cov — Python-facing Matérn covariance evaluation.
///
/// Purpose
/// -------
/// Convert a distance matrix and parameter vector from Python, evaluate the
/// Matérn covariance with the GIL released, and return a new numpy array.
///
/// Parameters
/// ----------
/// Called from Python as
/// `matern_cov(distances, covparms, *, parallel=False, distance_policy=None,
/// half_integer_tol=None)`:
/// - `distances`: `&PyAny`
///   2-D array-like of `f64` distances.
/// - `covparms`: `&PyAny`
///   1-D array-like `[smoothness, range, variance, nugget]`.
/// - `parallel`: `bool`
///   Evaluate entries on the rayon thread pool.
/// - `distance_policy`: `Option<&str>`
///   `"reject"` (default) or `"propagate"`.
/// - `half_integer_tol`: `Option<f64>`
///   Closed-form matching tolerance; defaults to `1e-10`.
///
/// Errors
/// ------
/// - `TypeError` if the inputs cannot be read as float arrays.
/// - `ValueError` for invalid parameters, options, or distances.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "matern_cov",
    signature = (distances, covparms, *, parallel = false, distance_policy = None, half_integer_tol = None),
    text_signature = "(distances, covparms, /, *, parallel=False, distance_policy=None, half_integer_tol=None)"
)]
pub fn py_matern_cov<'py>(
    py: Python<'py>, distances: &Bound<'py, PyAny>, covparms: &Bound<'py, PyAny>, parallel: bool,
    distance_policy: Option<&str>, half_integer_tol: Option<f64>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let options = extract_matern_options(parallel, distance_policy, half_integer_tol)?;

    let dist_arr = extract_f64_matrix(py, distances)?;
    let params_arr = extract_f64_array(py, covparms)?;
    let params: &[f64] = params_arr
        .as_slice()
        .map_err(|_| PyValueError::new_err("covparms must be a 1-D contiguous float64 array"))?;
    let dist_view = dist_arr.as_array();

    let cov = py.allow_threads(|| matern_cov_with_options(dist_view, params, options))?;
    Ok(cov.into_pyarray(py))
}

/// _matern_cov — PyO3 module initializer for the Python extension.
///
/// Creates the `covariance` submodule, attaches it to `_matern_cov`, and
/// registers it in `sys.modules` so `_matern_cov.covariance` imports resolve.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _matern_cov<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let covariance_mod = PyModule::new(_py, "covariance")?;
    register_covariance(_py, m, &covariance_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("_matern_cov.covariance", covariance_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn register_covariance<'py>(
    _py: Python, matern_cov: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_matern_cov, m)?)?;
    matern_cov.add_submodule(m)?;
    Ok(())
}
