//! Parameters of a Radon run and of the line selection that follows it.

use crate::geometry::Point2d;
use crate::transform::{axis_aligned_filter, Discretization};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Smallest theta merge tolerance, in theta buckets. Rasterized copies of
/// one edge spread up to two buckets around the strongest bucket, and the
/// strongest copy may itself sit one bucket off.
pub const MIN_MERGE_THETA_BUCKETS: f64 = 3.5;

/// Knobs shared by the calculator, the executor facade and the demo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadonParams {
    /// Internal timeout of one run in milliseconds.
    pub timeout_ms: u64,
    /// Worker pool size; `0` lets rayon pick the number of logical CPUs.
    pub worker_threads: usize,
    /// Number of lines extracted after the run.
    pub top_lines: usize,
    /// Maximum deviation from horizontal/vertical accepted by the line filter
    /// (degrees).
    pub theta_tolerance_deg: f64,
    /// Lines closer than this in rho (pixels) are merged.
    pub merge_rho_px: f64,
    /// Lines closer than this in theta (degrees) are merged.
    pub merge_theta_deg: f64,
}

impl Default for RadonParams {
    fn default() -> Self {
        Self {
            timeout_ms: 600_000,
            worker_threads: 0,
            top_lines: 4,
            theta_tolerance_deg: 10.0,
            merge_rho_px: 2.0,
            merge_theta_deg: 1.0,
        }
    }
}

impl RadonParams {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Merge tolerance as `(rho, theta_radians)`.
    pub fn merge_tolerance(&self) -> Point2d {
        Point2d::rho_theta(self.merge_rho_px, self.merge_theta_deg.to_radians())
    }

    /// [`merge_tolerance`](Self::merge_tolerance) widened in theta to at
    /// least [`MIN_MERGE_THETA_BUCKETS`] buckets of `disc`.
    pub fn merge_tolerance_for(&self, disc: &Discretization) -> Point2d {
        let tol = self.merge_tolerance();
        Point2d::rho_theta(tol.x, tol.y.max(MIN_MERGE_THETA_BUCKETS * disc.theta_step))
    }

    /// Filter keeping lines close to the image axes.
    pub fn line_filter(&self) -> impl Fn(&Point2d) -> bool + Clone + Send + Sync {
        axis_aligned_filter(self.theta_tolerance_deg.to_radians())
    }
}
