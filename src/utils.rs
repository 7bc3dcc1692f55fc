//! Conversion helpers for the PyO3 bindings.
//!
//! Everything here is compiled only with the `python-bindings` feature.

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArray2,       // Vec<Vec<f64>> → PyArray2
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
    PyReadonlyArray2,
};

#[cfg(feature = "python-bindings")]
use crate::covariance::options::{DEFAULT_HALF_INTEGER_TOL, DistancePolicy, Execution, MaternOptions};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Read a 2-D float matrix from a numpy array, a pandas DataFrame, or a
/// nested sequence. Non-contiguous numpy arrays are accepted as views.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray2<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro);
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro);
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, pandas.DataFrame, or nested sequence of float64",
        )
    })?;
    let arr = PyArray2::from_vec2(py, &rows)
        .map_err(|_| PyValueError::new_err("distance matrix rows must all have the same length"))?;
    Ok(arr.readonly())
}

#[cfg(feature = "python-bindings")]
pub fn extract_matern_options(
    parallel: bool, distance_policy: Option<&str>, half_integer_tol: Option<f64>,
) -> PyResult<MaternOptions> {
    let policy_str = distance_policy.unwrap_or("reject").to_lowercase();
    let policy = match policy_str.as_str() {
        "reject" | "error" => DistancePolicy::Reject,
        "propagate" | "nan" => DistancePolicy::Propagate,
        other => {
            return Err(PyValueError::new_err(format!(
                "invalid distance policy {:?} (expected 'reject' or 'propagate')",
                other
            )));
        }
    };
    let execution = if parallel { Execution::Parallel } else { Execution::Sequential };
    let tol = half_integer_tol.unwrap_or(DEFAULT_HALF_INTEGER_TOL);

    Ok(MaternOptions::new(tol, policy, execution)?)
}
