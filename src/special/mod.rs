//! special — Gamma and modified Bessel-K evaluation behind a narrow trait.
//!
//! Purpose
//! -------
//! Isolate the two special functions the Matérn kernel needs, `Γ(x)` and
//! `K_ν(x)`, behind [`SpecialFunctions`], so that any conforming numerical
//! library can be substituted without touching the kernel.
//!
//! Key behaviors
//! -------------
//! - [`SpecialFunctions`] requires `gamma` and `bessel_k`; the log-domain
//!   variants `ln_gamma` and `ln_bessel_k` have naive default bodies that
//!   robust implementations override.
//! - [`StandardSpecial`] takes `Γ` and `ln Γ` from `statrs` and evaluates
//!   `K_ν` with the log-scaled routines in [`bessel`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Implementations are pure and `Send + Sync`; the kernel may call them
//!   from rayon worker threads.
//! - `ln_bessel_k(ν, x)` is expected to stay finite for large `x` even when
//!   `K_ν(x)` underflows; the kernel evaluates the general Matérn branch in
//!   log space and relies on this.
//!
//! Testing notes
//! -------------
//! - Accuracy of `K_ν` is tested in [`bessel`]; this module tests the trait
//!   plumbing (default methods and the `statrs` delegation).

pub mod bessel;

use statrs::function::gamma;

/// Special functions consumed by the Matérn kernel.
pub trait SpecialFunctions: Send + Sync {
    /// Gamma function `Γ(x)`.
    fn gamma(&self, x: f64) -> f64;

    /// Modified Bessel function of the second kind `K_ν(x)`, `x > 0`.
    fn bessel_k(&self, nu: f64, x: f64) -> f64;

    /// `ln Γ(x)` for `x > 0`.
    fn ln_gamma(&self, x: f64) -> f64 {
        self.gamma(x).ln()
    }

    /// `ln K_ν(x)` for `x > 0`.
    fn ln_bessel_k(&self, nu: f64, x: f64) -> f64 {
        self.bessel_k(nu, x).ln()
    }
}

/// Default implementation: `statrs` Gamma, in-crate log-scaled Bessel-K.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardSpecial;

impl SpecialFunctions for StandardSpecial {
    fn gamma(&self, x: f64) -> f64 {
        gamma::gamma(x)
    }

    fn bessel_k(&self, nu: f64, x: f64) -> f64 {
        bessel::bessel_k(nu, x)
    }

    fn ln_gamma(&self, x: f64) -> f64 {
        gamma::ln_gamma(x)
    }

    fn ln_bessel_k(&self, nu: f64, x: f64) -> f64 {
        bessel::ln_bessel_k(nu, x)
    }
}
