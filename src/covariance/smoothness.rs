//! Tagged classification of the smoothness parameter `ν`.
//!
//! The Matérn kernel has closed forms at `ν ∈ {0.5, 1.5, 2.5}`; every other
//! value goes through the Bessel expression. `ν` is classified once per call
//! and the resulting [`Smoothness`] tag drives the per-entry dispatch.

/// Smoothness class of a Matérn kernel.
///
/// - `Exponential`: `ν = 1/2`, `C(d) = σ² e^{-d/ϕ}`.
/// - `ThreeHalves`: `ν = 3/2`.
/// - `FiveHalves`: `ν = 5/2`.
/// - `General(ν)`: any other positive `ν`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Smoothness {
    Exponential,
    ThreeHalves,
    FiveHalves,
    General(f64),
}

impl Smoothness {
    /// Classify `nu`, matching a closed form when `|ν - ν₀| <= tol`.
    pub fn classify(nu: f64, tol: f64) -> Self {
        if (nu - 0.5).abs() <= tol {
            Smoothness::Exponential
        } else if (nu - 1.5).abs() <= tol {
            Smoothness::ThreeHalves
        } else if (nu - 2.5).abs() <= tol {
            Smoothness::FiveHalves
        } else {
            Smoothness::General(nu)
        }
    }

    /// Smoothness value represented by this class.
    pub fn nu(&self) -> f64 {
        match self {
            Smoothness::Exponential => 0.5,
            Smoothness::ThreeHalves => 1.5,
            Smoothness::FiveHalves => 2.5,
            Smoothness::General(nu) => *nu,
        }
    }

    pub fn is_closed_form(&self) -> bool {
        !matches!(self, Smoothness::General(_))
    }
}
