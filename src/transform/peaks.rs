//! Selection of the strongest distinct lines in an accumulator.
use crate::angle::{angular_difference, are_close};
use crate::geometry::Point2d;
use serde::Serialize;
use std::cmp::Ordering;
use std::f64::consts::{FRAC_PI_2, PI};

/// Tolerance used when no merge tolerance is given: only numerically equal
/// lines are merged.
pub const DEFAULT_MERGE_TOLERANCE: Point2d = Point2d::rho_theta(1e-4, 1e-4);

/// A selected line and its accumulator value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Peak {
    pub rho_theta: Point2d,
    pub value: f64,
}

/// Bounded collector of the `size` best peaks.
///
/// Candidates closer than `tolerance` (rho in `x`, theta in `y`, both
/// inclusive) to an already kept peak compete with it: the larger value
/// survives, ties keep the incumbent. Closeness also holds across the
/// `theta = π` seam, where `(rho, π - ε)` is the line `(-rho, -ε)`.
pub struct TopLinesCollector<F> {
    size: usize,
    min_value: f64,
    filter: F,
    tolerance: Point2d,
    peaks: Vec<Peak>,
}

impl<F> TopLinesCollector<F>
where
    F: Fn(&Point2d) -> bool,
{
    /// The floor starts at `0.0`, which keeps negative no-data cells out.
    pub fn new(size: usize, filter: F, tolerance: Point2d) -> Self {
        Self {
            size,
            min_value: 0.0,
            filter,
            tolerance,
            peaks: Vec::with_capacity(size + 1),
        }
    }

    /// Cheap pre-check so callers can skip the index conversion.
    #[inline]
    pub fn accepts(&self, value: f64) -> bool {
        self.size > 0 && value >= self.min_value
    }

    pub fn offer(&mut self, rho_theta: Point2d, value: f64) {
        if !self.accepts(value) || !(self.filter)(&rho_theta) {
            return;
        }

        let tol = self.tolerance;
        let is_close = |p: &Peak| same_line(&p.rho_theta, &rho_theta, tol);
        let strongest_close = self
            .peaks
            .iter()
            .filter(|p| is_close(p))
            .map(|p| p.value)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));
        if let Some(incumbent) = strongest_close {
            if value <= incumbent {
                return;
            }
            self.peaks.retain(|p| !is_close(p));
        }

        self.peaks.push(Peak { rho_theta, value });
        self.peaks.sort_by(compare_peaks);
        if self.peaks.len() >= self.size {
            self.peaks.truncate(self.size);
            if let Some(last) = self.peaks.last() {
                self.min_value = last.value;
            }
        }
    }

    pub fn into_peaks(self) -> Vec<Peak> {
        self.peaks
    }
}

/// `true` when `a` and `b` lie within `tol` of each other, either directly
/// or after flipping one of them across `theta = π`.
fn same_line(a: &Point2d, b: &Point2d, tol: Point2d) -> bool {
    let direct = are_close(a.rho(), b.rho(), tol.x) && are_close(a.theta(), b.theta(), tol.y);
    direct
        || (are_close(a.rho(), -b.rho(), tol.x)
            && are_close(PI - (a.theta() - b.theta()).abs(), 0.0, tol.y))
}

/// Descending value, then ascending `|rho|`, then ascending theta.
fn compare_peaks(a: &Peak, b: &Peak) -> Ordering {
    b.value
        .total_cmp(&a.value)
        .then_with(|| a.rho_theta.rho().abs().total_cmp(&b.rho_theta.rho().abs()))
        .then_with(|| a.rho_theta.theta().total_cmp(&b.rho_theta.theta()))
}

/// Accepts lines whose normal lies within `tolerance` radians of the x or y
/// axis, i.e. horizontal and vertical lines.
pub fn axis_aligned_filter(tolerance: f64) -> impl Fn(&Point2d) -> bool + Clone + Send + Sync {
    move |rt: &Point2d| {
        angular_difference(rt.theta(), 0.0) <= tolerance
            || angular_difference(rt.theta(), FRAC_PI_2) <= tolerance
    }
}

/// Filter accepting every line.
pub fn accept_all(_: &Point2d) -> bool {
    true
}
