//! Angle utilities shared by the transform and the geometry kernel.
//!
//! Lines are undirected, so every orientation lives in `[0, π)`. A polar line
//! `(rho, theta)` and `(-rho, theta + π)` describe the same set of points.

use std::f64::consts::PI;

/// Folds a polar line so that `theta ∈ [0, π)`, negating `rho` whenever the
/// fold shifts the normal by an odd multiple of π.
#[inline]
pub fn fold_rho_theta(rho: f64, theta: f64) -> (f64, f64) {
    let turns = (theta / PI).floor();
    let mut folded = theta - turns * PI;
    let mut odd = (turns as i64).rem_euclid(2) == 1;
    if folded >= PI - 1e-12 {
        folded = 0.0;
        odd = !odd;
    }
    if odd {
        (-rho, folded)
    } else {
        (rho, folded)
    }
}

/// Computes the smallest unsigned angular difference between two angles,
/// treating antipodal directions as equivalent (i.e. π apart → 0).
#[inline]
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs().rem_euclid(PI);
    if diff > std::f64::consts::FRAC_PI_2 {
        PI - diff
    } else {
        diff
    }
}

/// `|a - b| <= tolerance`.
#[inline]
pub fn are_close(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}
