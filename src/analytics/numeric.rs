//! Numeric primitives shared by the pivot and greeks calculators.

use statrs::distribution::{ContinuousCDF, Normal};
use std::f64::consts::PI;

/// Round to 2 decimal places.
///
/// Rounds the exact binary value: exact halves such as `17500.125` go to
/// the even digit (`17500.12`).
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// `x²`, clamped to `f64::MAX` when the square overflows.
///
/// Callers negate and exponentiate the result, so the clamp keeps
/// `exp(-x²/2)` at a finite 0.0 instead of feeding infinity downstream.
pub fn clamped_square(x: f64) -> f64 {
    let square = x.powi(2);
    if square.is_infinite() { f64::MAX } else { square }
}

/// Standard normal PDF: φ(x) = (1/√(2π)) * e^(-x²/2)
pub fn norm_pdf(x: f64) -> f64 {
    (-clamped_square(x) / 2.0).exp() / (2.0 * PI).sqrt()
}

/// Standard normal CDF: Φ(x)
pub fn norm_cdf(x: f64) -> f64 {
    // mean 0 / std 1 is always a valid parameterisation
    match Normal::new(0.0, 1.0) {
        Ok(normal) => normal.cdf(x),
        Err(_) => f64::NAN,
    }
}
