//! covariance::matern — elementwise Matérn covariance evaluation.
//!
//! Purpose
//! -------
//! Map a matrix of pairwise distances to the matrix of Matérn covariances
//!
//! ```text
//! C(0) = σ² + τ²
//! C(d) = σ² · 2^{1-ν}/Γ(ν) · (√(2ν)·d/ϕ)^ν · K_ν(√(2ν)·d/ϕ),   d > 0
//! ```
//!
//! with the closed forms used at `ν ∈ {1/2, 3/2, 5/2}`:
//! - `ν = 1/2`: `σ² e^{-d/ϕ}`
//! - `ν = 3/2`: `σ² (1 + z) e^{-z}`, `z = √3·d/ϕ`
//! - `ν = 5/2`: `σ² (1 + z + z²/3) e^{-z}`, `z = √5·d/ϕ`
//!
//! Key behaviors
//! -------------
//! - Zero distances are intercepted before any branch and return the sill
//!   `σ² + τ²`; the nugget never enters off-zero entries.
//! - The general branch is evaluated in log space,
//!   `ln ρ = ln(2^{1-ν}/Γ(ν)) + ν ln z + ln K_ν(z)`, so neither `Γ(ν)`,
//!   `z^ν` nor `K_ν(z)` overflow or underflow on their own.
//! - Parameters and (under [`DistancePolicy::Reject`]) distances are
//!   validated before the first entry is computed.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output shape equals input shape; the input is never mutated.
//! - For valid inputs every entry lies in `[0, σ² + τ²]`; symmetric inputs
//!   give symmetric outputs because the map is elementwise.
//! - Results underflowing to zero at very large `d/ϕ` are not errors; they
//!   are counted and reported at `debug` level.
//!
//! Downstream usage
//! ----------------
//! - [`matern_cov`] is the one-shot entry point taking the host-ordered
//!   parameter vector `[ν, ϕ, σ², τ²]`.
//! - Build a [`MaternKernel`] once to evaluate several matrices or scalar
//!   distances with the same parameters, or to plug in another
//!   [`SpecialFunctions`] implementation via [`MaternKernel::with_special`].
use crate::covariance::{
    errors::MaternResult,
    options::{DistancePolicy, Execution, MaternOptions},
    params::MaternParams,
    smoothness::Smoothness,
    validation::validate_distances,
};
use crate::special::{SpecialFunctions, StandardSpecial};
use log::{Level, debug, log_enabled};
use ndarray::{Array2, ArrayView2, Zip};

const SQRT_3: f64 = 1.732_050_807_568_877_2;
const SQRT_5: f64 = 2.236_067_977_499_79;

/// Scaled distances below this return the `d → 0⁺` limit `ρ = 1` in the
/// general branch; it sits near `√f64::MIN_POSITIVE`, where `K_ν` start
/// values would leave the `f64` range.
const SMALL_SCALED_DISTANCE: f64 = 1.5e-154;

/// Past this scaled distance the closed forms are below the smallest
/// subnormal `f64` and return exactly `0`; `z²` would overflow first.
const CLOSED_FORM_ZERO_BEYOND: f64 = 1.0e3;

/// Compute the Matérn covariance matrix for `distances`.
///
/// Parameters
/// ----------
/// - `distances`: `ArrayView2<f64>`, rows×cols, finite and non-negative.
/// - `covparms`: `&[f64]` of length 4, `[smoothness, range, variance, nugget]`.
///
/// Returns
/// -------
/// A newly allocated rows×cols matrix of covariances.
///
/// Errors
/// ------
/// - Any [`MaternParams::from_slice`] error for a malformed parameter vector.
/// - `NonFiniteDistance` / `NegativeDistance` for invalid distance entries.
///
/// Examples
/// --------
/// ```rust
/// # use matern_cov::covariance::matern_cov;
/// # use ndarray::array;
/// let d = array![[0.0, 1.0], [1.0, 0.0]];
/// let cov = matern_cov(d.view(), &[0.5, 1.0, 2.0, 0.1]).unwrap();
/// assert!((cov[[0, 0]] - 2.1).abs() < 1e-12);
/// assert!((cov[[0, 1]] - 2.0 * (-1.0f64).exp()).abs() < 1e-12);
/// ```
pub fn matern_cov(distances: ArrayView2<'_, f64>, covparms: &[f64]) -> MaternResult<Array2<f64>> {
    matern_cov_with_options(distances, covparms, MaternOptions::default())
}

/// [`matern_cov`] with explicit [`MaternOptions`].
pub fn matern_cov_with_options(
    distances: ArrayView2<'_, f64>, covparms: &[f64], options: MaternOptions,
) -> MaternResult<Array2<f64>> {
    let params = MaternParams::from_slice(covparms)?;
    MaternKernel::new(params, options).evaluate(distances)
}

/// MaternKernel — a Matérn covariance function with fixed parameters.
///
/// Purpose
/// -------
/// Hold validated parameters, the classified smoothness, and the
/// precomputed normalizing constant of the general branch, so repeated
/// evaluations only pay for the per-entry work.
///
/// Fields
/// ------
/// - `params`: validated `[ν, ϕ, σ², τ²]`.
/// - `smoothness`: tag selecting the closed form or the Bessel branch.
/// - `options`: tolerance, distance policy and execution strategy.
/// - `special`: Gamma / Bessel-K provider.
/// - `sqrt_2nu`, `ln_norm`: `√(2ν)` and `ln(2^{1-ν}/Γ(ν))`.
#[derive(Debug, Clone)]
pub struct MaternKernel<S = StandardSpecial> {
    params: MaternParams,
    smoothness: Smoothness,
    options: MaternOptions,
    special: S,
    sqrt_2nu: f64,
    ln_norm: f64,
}

impl MaternKernel<StandardSpecial> {
    /// Kernel backed by [`StandardSpecial`].
    pub fn new(params: MaternParams, options: MaternOptions) -> Self {
        Self::with_special(params, options, StandardSpecial)
    }

    /// Parse a host-ordered parameter vector and build the kernel.
    pub fn from_covparms(covparms: &[f64], options: MaternOptions) -> MaternResult<Self> {
        Ok(Self::new(MaternParams::from_slice(covparms)?, options))
    }
}

impl<S: SpecialFunctions> MaternKernel<S> {
    /// Kernel backed by a caller-supplied special-function provider.
    pub fn with_special(params: MaternParams, options: MaternOptions, special: S) -> Self {
        let nu = params.smoothness();
        let smoothness = Smoothness::classify(nu, options.half_integer_tol());
        let ln_norm = (1.0 - nu) * std::f64::consts::LN_2 - special.ln_gamma(nu);
        MaternKernel { params, smoothness, options, special, sqrt_2nu: (2.0 * nu).sqrt(), ln_norm }
    }

    pub fn params(&self) -> &MaternParams {
        &self.params
    }

    pub fn smoothness(&self) -> Smoothness {
        self.smoothness
    }

    pub fn options(&self) -> &MaternOptions {
        &self.options
    }

    /// Matérn correlation `ρ(d)` with `ρ(0) = 1`.
    ///
    /// NaN and negative distances give NaN; distances whose scaled ratio
    /// overflows, or whose closed form lies below the `f64` range, give `0`.
    pub fn correlation(&self, d: f64) -> f64 {
        if d.is_nan() || d < 0.0 {
            return f64::NAN;
        }
        if d == 0.0 {
            return 1.0;
        }
        let r = d / self.params.range();
        if r == f64::INFINITY {
            return 0.0;
        }
        match self.smoothness {
            Smoothness::Exponential => (-r).exp(),
            Smoothness::ThreeHalves => {
                let z = SQRT_3 * r;
                if z > CLOSED_FORM_ZERO_BEYOND {
                    return 0.0;
                }
                (1.0 + z) * (-z).exp()
            }
            Smoothness::FiveHalves => {
                let z = SQRT_5 * r;
                if z > CLOSED_FORM_ZERO_BEYOND {
                    return 0.0;
                }
                (1.0 + z + z * z / 3.0) * (-z).exp()
            }
            Smoothness::General(nu) => self.general_correlation(nu, self.sqrt_2nu * r),
        }
    }

    /// Matérn covariance `C(d)`: the sill at `d = 0`, `σ² ρ(d)` elsewhere.
    pub fn covariance(&self, d: f64) -> f64 {
        if d == 0.0 {
            return self.params.sill();
        }
        self.params.variance() * self.correlation(d)
    }

    /// Evaluate the covariance of every entry of `distances`.
    ///
    /// # Errors
    /// Under [`DistancePolicy::Reject`], returns the first invalid entry
    /// reported by [`validate_distances`]; nothing is computed in that case.
    pub fn evaluate(&self, distances: ArrayView2<'_, f64>) -> MaternResult<Array2<f64>> {
        if self.options.distance_policy() == DistancePolicy::Reject {
            validate_distances(distances)?;
        }

        let (rows, cols) = distances.dim();
        debug!(
            "matern: evaluating {rows}x{cols} distances with {:?}, params {:?}, {:?} execution",
            self.smoothness,
            self.params.to_array(),
            self.options.execution()
        );

        let mut cov = distances.to_owned();
        match self.options.execution() {
            Execution::Sequential => cov.mapv_inplace(|d| self.covariance(d)),
            Execution::Parallel => {
                debug!("matern: parallel evaluation on {} threads", rayon::current_num_threads());
                cov.par_mapv_inplace(|d| self.covariance(d));
            }
        }

        if log_enabled!(Level::Debug) {
            self.report_underflow(distances, &cov);
        }
        Ok(cov)
    }

    fn general_correlation(&self, nu: f64, z: f64) -> f64 {
        if z < SMALL_SCALED_DISTANCE {
            return 1.0;
        }
        if z == f64::INFINITY {
            return 0.0;
        }
        let ln_rho = self.ln_norm + nu * z.ln() + self.special.ln_bessel_k(nu, z);
        let rho = ln_rho.exp();
        // NaN must survive the clamp.
        if rho > 1.0 { 1.0 } else { rho }
    }

    fn report_underflow(&self, distances: ArrayView2<'_, f64>, cov: &Array2<f64>) {
        if self.params.variance() == 0.0 {
            return;
        }
        let underflowed = Zip::from(&distances).and(cov).fold(0usize, |count, &d, &c| {
            if c == 0.0 && d > 0.0 && d.is_finite() { count + 1 } else { count }
        });
        if underflowed > 0 {
            debug!("matern: {underflowed} covariance entries underflowed to zero");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::covariance::errors::MaternError;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The zero-distance sill, symmetry, boundedness and monotone decay.
    // - Closed forms at ν ∈ {1/2, 3/2, 5/2} and their agreement with the
    //   Bessel branch at nearby non-special ν.
    // - The general branch against a tabulated K₁ value, at large ν, and far
    //   into the tail where K_ν alone underflows.
    // - Parameter / distance rejection and the propagating distance policy.
    // - Sequential vs parallel execution and special-function substitution.
    //
    // They intentionally DO NOT cover:
    // - Accuracy of K_ν itself (see `special::bessel`).
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-12;

    fn coords_distances(coords: &[(f64, f64)]) -> Array2<f64> {
        let n = coords.len();
        Array2::from_shape_fn((n, n), |(i, j)| {
            let (dx, dy) = (coords[i].0 - coords[j].0, coords[i].1 - coords[j].1);
            (dx * dx + dy * dy).sqrt()
        })
    }

    fn sample_distances() -> Array2<f64> {
        coords_distances(&[(0.0, 0.0), (0.3, 0.1), (1.2, -0.7), (2.5, 2.5), (-4.0, 1.0), (0.05, 0.0)])
    }

    fn kernel(covparms: &[f64]) -> MaternKernel {
        MaternKernel::from_covparms(covparms, MaternOptions::default()).expect("valid parameters")
    }

    fn exact_kernel(covparms: &[f64]) -> MaternKernel {
        let opts = MaternOptions::new(0.0, DistancePolicy::Reject, Execution::Sequential)
            .expect("zero tolerance is valid");
        MaternKernel::from_covparms(covparms, opts).expect("valid parameters")
    }

    #[test]
    // Purpose
    // -------
    // Reproduce the two-point exponential scenario.
    //
    // Given
    // -----
    // - D = [[0, 1], [1, 0]], params = [0.5, 1.0, 2.0, 0.1].
    //
    // Expect
    // ------
    // - [[2.1, 2e^{-1}], [2e^{-1}, 2.1]].
    fn matern_cov_two_point_exponential_scenario() {
        // Arrange
        let d = array![[0.0, 1.0], [1.0, 0.0]];

        // Act
        let cov = matern_cov(d.view(), &[0.5, 1.0, 2.0, 0.1]).expect("valid call");

        // Assert
        let off = 2.0 * (-1.0f64).exp();
        assert!((cov[[0, 0]] - 2.1).abs() < TOL);
        assert!((cov[[1, 1]] - 2.1).abs() < TOL);
        assert!((cov[[0, 1]] - off).abs() < TOL);
        assert!((cov[[1, 0]] - off).abs() < TOL);
        assert!((off - 0.7358).abs() < 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // Reproduce the ν = 3/2 row-vector scenario.
    //
    // Given
    // -----
    // - D = [[0, 2]], params = [1.5, 1.0, 1.0, 0.0].
    //
    // Expect
    // ------
    // - cov[0][0] = 1 and cov[0][1] = (1 + 2√3) e^{-2√3} ≈ 0.1397.
    fn matern_cov_three_halves_scenario() {
        let d = array![[0.0, 2.0]];

        let cov = matern_cov(d.view(), &[1.5, 1.0, 1.0, 0.0]).expect("valid call");

        let z = 2.0 * 3f64.sqrt();
        let expected = (1.0 + z) * (-z).exp();
        assert_eq!(cov.dim(), (1, 2));
        assert!((cov[[0, 0]] - 1.0).abs() < TOL);
        assert!((cov[[0, 1]] - expected).abs() < TOL);
        assert!((cov[[0, 1]] - 0.1397).abs() < 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // The five-halves closed form matches its formula in ϕ and d.
    fn matern_cov_five_halves_matches_closed_form() {
        let k = kernel(&[2.5, 0.7, 3.0, 0.0]);
        for d in [0.01, 0.4, 1.0, 3.3] {
            let r = d / 0.7;
            let expected = 3.0
                * (1.0 + 5f64.sqrt() * r + 5.0 * r * r / 3.0)
                * (-(5f64.sqrt()) * r).exp();
            assert!((k.covariance(d) - expected).abs() < TOL, "d = {d}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Diagonal entries equal the sill for every smoothness branch, and the
    // output is symmetric and bounded by the sill.
    //
    // Given
    // -----
    // - A 6×6 Euclidean distance matrix.
    // - ν ∈ {0.3, 0.5, 1.0, 1.5, 2.5, 4.7}, ϕ = 0.8, σ² = 1.7, τ² = 0.25.
    //
    // Expect
    // ------
    // - cov[i][i] = 1.95, cov = covᵀ, 0 ≤ cov ≤ 1.95.
    fn matern_cov_diagonal_symmetry_and_bounds() {
        let d = sample_distances();
        for nu in [0.3, 0.5, 1.0, 1.5, 2.5, 4.7] {
            let cov = matern_cov(d.view(), &[nu, 0.8, 1.7, 0.25]).expect("valid call");
            let sill = 1.7 + 0.25;
            for i in 0..d.nrows() {
                assert!((cov[[i, i]] - sill).abs() < TOL, "ν = {nu}, i = {i}");
                for j in 0..d.ncols() {
                    assert_eq!(cov[[i, j]], cov[[j, i]], "ν = {nu}, ({i}, {j})");
                    assert!(
                        (0.0..=sill + TOL).contains(&cov[[i, j]]),
                        "ν = {nu}, ({i}, {j}) = {}",
                        cov[[i, j]]
                    );
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Covariance is non-increasing in distance for every branch.
    //
    // Given
    // -----
    // - d on a grid from 0 to 20, τ² = 0.
    //
    // Expect
    // ------
    // - C(d_{k+1}) ≤ C(d_k) up to rounding.
    fn covariance_decays_monotonically() {
        for nu in [0.2, 0.5, 0.9, 1.5, 2.5, 3.2, 12.0] {
            let k = kernel(&[nu, 1.3, 2.0, 0.0]);
            let mut previous = k.covariance(0.0);
            for step in 1..=400 {
                let current = k.covariance(step as f64 * 0.05);
                assert!(current <= previous + TOL, "ν = {nu}, step {step}: {current} > {previous}");
                previous = current;
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // The Bessel branch converges to each closed form as ν approaches the
    // half-integer.
    //
    // Given
    // -----
    // - Zero half-integer tolerance, so ν₀ + 1e-9 takes the general branch.
    //
    // Expect
    // ------
    // - Relative agreement with the closed form below 1e-6.
    fn general_branch_agrees_with_closed_forms_near_half_integers() {
        for nu0 in [0.5, 1.5, 2.5] {
            let closed = exact_kernel(&[nu0, 1.1, 1.0, 0.0]);
            let general = exact_kernel(&[nu0 + 1e-9, 1.1, 1.0, 0.0]);
            assert!(closed.smoothness().is_closed_form());
            assert!(!general.smoothness().is_closed_form());
            for d in [0.05, 0.5, 1.0, 2.2, 6.0] {
                let expected = closed.covariance(d);
                let actual = general.covariance(d);
                assert!(
                    ((actual - expected) / expected).abs() < 1e-6,
                    "ν₀ = {nu0}, d = {d}: {actual} vs {expected}"
                );
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // For ν = 1, ρ(d) = z K₁(z) with z = √2·d/ϕ.
    //
    // Given
    // -----
    // - d/ϕ = 1/√2, so z = 1 and ρ = K₁(1).
    //
    // Expect
    // ------
    // - σ² K₁(1) with K₁(1) = 0.6019072301972346.
    fn general_branch_matches_tabulated_bessel_value() {
        let k = kernel(&[1.0, 2.0, 3.0, 0.5]);
        let d = 2.0 / 2f64.sqrt();
        let expected = 3.0 * 0.601_907_230_197_234_6;
        assert!((k.covariance(d) - expected).abs() < 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Far in the tail the general branch returns a tiny positive value even
    // though K_ν(z) alone underflows.
    //
    // Given
    // -----
    // - ν = 3.3, ϕ = 1, d = 292 (z ≈ 750).
    //
    // Expect
    // ------
    // - K_ν(z) == 0 in f64, while C(d) > 0.
    fn general_branch_survives_bessel_underflow() {
        let k = kernel(&[3.3, 1.0, 1.0, 0.0]);
        let z = (2.0f64 * 3.3).sqrt() * 292.0;
        assert_eq!(crate::special::bessel::bessel_k(3.3, z), 0.0);
        assert!(k.covariance(292.0) > 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Large smoothness stays finite near the origin and approaches the sill.
    fn general_branch_large_smoothness_near_origin() {
        let k = kernel(&[40.0, 1.0, 1.0, 0.0]);
        let tiny = k.covariance(1e-8);
        assert!(tiny.is_finite());
        assert!((tiny - 1.0).abs() < 1e-10);
        let below_cutoff = k.covariance(1e-200);
        assert_eq!(below_cutoff, 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Huge but finite `d/ϕ` decays to exactly zero in every branch instead
    // of overflowing the polynomial factor or the scaled distance.
    //
    // Given
    // -----
    // - ν = 2.5 with ϕ = 1e-160, d = 1 (z² overflows).
    // - ν ∈ {0.5, 1.5, 1.0} with ϕ = 1, d = 1.7e308 (z overflows).
    //
    // Expect
    // ------
    // - C(d) == 0 for all cases; the matrix path agrees.
    fn astronomic_scaled_distances_decay_to_zero() {
        assert_eq!(kernel(&[2.5, 1e-160, 1.0, 0.0]).covariance(1.0), 0.0);
        for nu in [0.5, 1.5, 1.0] {
            let c = kernel(&[nu, 1.0, 1.0, 0.0]).covariance(1.7e308);
            assert_eq!(c, 0.0, "ν = {nu}: C(1.7e308) = {c}");
        }

        let cov = matern_cov(array![[0.0, 1.7e308]].view(), &[1.0, 1.0, 1.0, 0.0])
            .expect("finite distances are valid");
        assert_eq!(cov, array![[1.0, 0.0]]);
        let cov = matern_cov(array![[0.0, 1.0]].view(), &[2.5, 1e-160, 1.0, 0.0])
            .expect("finite distances are valid");
        assert_eq!(cov, array![[1.0, 0.0]]);
    }

    #[test]
    // Purpose
    // -------
    // Invalid smoothness or range fail before anything is computed.
    //
    // Given
    // -----
    // - params [-1, 1, 1, 0] and [1, 0, 1, 0].
    //
    // Expect
    // ------
    // - `InvalidSmoothness` and `InvalidRange`.
    fn matern_cov_rejects_invalid_parameters() {
        let d = sample_distances();
        assert_eq!(
            matern_cov(d.view(), &[-1.0, 1.0, 1.0, 0.0]),
            Err(MaternError::InvalidSmoothness { value: -1.0 })
        );
        assert_eq!(
            matern_cov(d.view(), &[1.0, 0.0, 1.0, 0.0]),
            Err(MaternError::InvalidRange { value: 0.0 })
        );
        assert_eq!(
            matern_cov(d.view(), &[1.0, 1.0, 1.0]),
            Err(MaternError::InvalidParameterCount { len: 3 })
        );
    }

    #[test]
    // Purpose
    // -------
    // The default policy rejects bad distances; the propagating policy maps
    // them to NaN / 0.
    //
    // Given
    // -----
    // - D = [[0, NaN], [-1, ∞]], params [1.5, 1, 1, 0.2].
    //
    // Expect
    // ------
    // - Reject: `NonFiniteDistance` at (0, 1).
    // - Propagate: [[1.2, NaN], [NaN, 0]].
    fn distance_policies_reject_or_propagate() {
        let d = array![[0.0, f64::NAN], [-1.0, f64::INFINITY]];
        let params = [1.5, 1.0, 1.0, 0.2];

        let rejected = matern_cov(d.view(), &params);
        assert!(matches!(rejected, Err(MaternError::NonFiniteDistance { row: 0, col: 1, .. })));

        let opts = MaternOptions::default().with_distance_policy(DistancePolicy::Propagate);
        let cov = matern_cov_with_options(d.view(), &params, opts).expect("propagate never fails");
        assert!((cov[[0, 0]] - 1.2).abs() < TOL);
        assert!(cov[[0, 1]].is_nan());
        assert!(cov[[1, 0]].is_nan());
        assert_eq!(cov[[1, 1]], 0.0);
    }

    #[test]
    // Purpose
    // -------
    // With zero variance only the nugget remains, on zero distances.
    fn zero_variance_leaves_nugget_on_zero_distances() {
        let d = array![[0.0, 0.4], [0.4, 0.0]];
        let cov = matern_cov(d.view(), &[0.8, 1.0, 0.0, 0.3]).expect("valid call");
        assert_eq!(cov, array![[0.3, 0.0], [0.0, 0.3]]);
    }

    #[test]
    // Purpose
    // -------
    // Rectangular and empty inputs keep their shape.
    fn evaluate_preserves_shape() {
        let rect = array![[0.0, 1.0, 2.0], [3.0, 0.5, 0.0]];
        let cov = matern_cov(rect.view(), &[2.0, 1.0, 1.0, 0.0]).expect("valid call");
        assert_eq!(cov.dim(), (2, 3));
        assert!((cov[[1, 2]] - 1.0).abs() < TOL);

        let empty = Array2::<f64>::zeros((0, 0));
        let cov_empty = matern_cov(empty.view(), &[2.0, 1.0, 1.0, 0.0]).expect("valid call");
        assert_eq!(cov_empty.dim(), (0, 0));
    }

    #[test]
    // Purpose
    // -------
    // Parallel execution gives exactly the sequential result and leaves the
    // input untouched.
    fn parallel_execution_matches_sequential() {
        let coords: Vec<(f64, f64)> =
            (0..40).map(|i| ((i as f64 * 0.37).sin() * 3.0, (i as f64 * 0.11).cos() * 2.0)).collect();
        let d = coords_distances(&coords);
        let before = d.clone();
        let params = [1.2, 0.9, 1.4, 0.1];

        let seq = matern_cov(d.view(), &params).expect("valid call");
        let opts = MaternOptions::default().with_execution(Execution::Parallel);
        let par = matern_cov_with_options(d.view(), &params, opts).expect("valid call");

        assert_eq!(seq, par);
        assert_eq!(d, before);
    }

    #[test]
    // Purpose
    // -------
    // A substituted special-function provider is actually used.
    //
    // Given
    // -----
    // - A provider returning 2·K_ν.
    //
    // Expect
    // ------
    // - General-branch correlations double where they stay below 1.
    fn with_special_uses_supplied_provider() {
        struct DoubledBessel;

        impl SpecialFunctions for DoubledBessel {
            fn gamma(&self, x: f64) -> f64 {
                StandardSpecial.gamma(x)
            }

            fn bessel_k(&self, nu: f64, x: f64) -> f64 {
                2.0 * StandardSpecial.bessel_k(nu, x)
            }
        }

        let params = MaternParams::new(1.0, 1.0, 1.0, 0.0).expect("valid parameters");
        let standard = MaternKernel::new(params, MaternOptions::default());
        let doubled = MaternKernel::with_special(params, MaternOptions::default(), DoubledBessel);

        let d = 3.0;
        let ratio = doubled.correlation(d) / standard.correlation(d);
        assert!((ratio - 2.0).abs() < 1e-10, "ratio = {ratio}");
    }
}
