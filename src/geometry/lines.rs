//! Polar line helpers: intersections, projections and `(rho, theta)` of a
//! pixel segment relative to an image center.
//!
//! A polar line satisfies `x·cos θ + y·sin θ = ρ` in coordinates relative to
//! the reference center.

use super::Point2d;
use crate::angle::fold_rho_theta;
use nalgebra::Matrix2;

/// Determinant magnitude at or below which two lines are treated as parallel.
pub const PARALLEL_DET_EPS: f64 = 1e-4;

const CENTER_EPS: f64 = 1e-4;

/// Intersection of two polar lines, relative to the reference center.
///
/// Returns `None` for (near-)parallel lines.
pub fn intersect(rho_theta1: Point2d, rho_theta2: Point2d) -> Option<Point2d> {
    let (s1, c1) = rho_theta1.theta().sin_cos();
    let (s2, c2) = rho_theta2.theta().sin_cos();
    let rho1 = rho_theta1.rho();
    let rho2 = rho_theta2.rho();

    let det = Matrix2::new(c1, s1, c2, s2).determinant();
    if det.abs() <= PARALLEL_DET_EPS {
        return None;
    }
    // Cramer's rule: replace one column with the right-hand side.
    let det_x = Matrix2::new(rho1, s1, rho2, s2).determinant();
    let det_y = Matrix2::new(c1, rho1, c2, rho2).determinant();
    Some(Point2d::new(det_x / det, det_y / det))
}

/// Intersection translated into image coordinates, discarded when it falls
/// outside `[0, width) × [0, height)`.
///
/// The bounds are checked on the float coordinates, not on the truncated
/// pixel, so `(-0.5, y)` is outside even though it truncates to column 0.
pub fn intersect_within_bounds(
    center: Point2d,
    rho_theta1: Point2d,
    rho_theta2: Point2d,
    width: usize,
    height: usize,
) -> Option<Point2d> {
    let p = center + intersect(rho_theta1, rho_theta2)?;
    is_inside(&p, width, height).then_some(p)
}

/// Every in-bounds intersection of every unordered pair of `lines`, in input
/// order (`(0,1), (0,2), …, (1,2), …`). No deduplication.
pub fn all_pairwise_intersections(
    center: Point2d,
    lines: &[Point2d],
    width: usize,
    height: usize,
) -> Vec<Point2d> {
    let mut out = Vec::new();
    for (i, &first) in lines.iter().enumerate() {
        for &second in &lines[i + 1..] {
            if let Some(p) = intersect_within_bounds(center, first, second, width, height) {
                out.push(p);
            }
        }
    }
    out
}

/// Orthogonal projection of `point` onto the infinite line through
/// `segment_start` and `segment_end`.
pub fn closest_point_on_line(
    segment_start: Point2d,
    segment_end: Point2d,
    point: Point2d,
) -> Point2d {
    let dir = (segment_end - segment_start).normalize();
    let along = dir.dot(&(point - segment_start));
    segment_start + dir * along
}

/// Foot of the normal from `center` to the polar line (image coordinates).
pub fn nearest_point(center: Point2d, rho_theta: Point2d) -> Point2d {
    let (s, c) = rho_theta.theta().sin_cos();
    Point2d::new(center.x + rho_theta.rho() * c, center.y + rho_theta.rho() * s)
}

/// Unit direction along the polar line.
pub fn line_direction(rho_theta: Point2d) -> Point2d {
    let (s, c) = rho_theta.theta().sin_cos();
    Point2d::new(s, -c)
}

/// `(rho, theta)` of the line through two pixels, relative to `center`, with
/// `theta` folded into `[0, π)`.
///
/// The normal direction is taken from the center to its projection on the
/// line; when the line passes through the center the segment's own normal is
/// used instead.
pub fn line_rho_theta(center: Point2d, start: Point2d, end: Point2d) -> Point2d {
    let delta = closest_point_on_line(start, end, center) - center;
    let (rho, theta) = if delta.x.abs() <= CENTER_EPS && delta.y.abs() <= CENTER_EPS {
        let dir = end - start;
        (0.0, dir.x.atan2(-dir.y))
    } else {
        (delta.norm(), delta.y.atan2(delta.x))
    };
    let (rho, theta) = fold_rho_theta(rho, theta);
    Point2d::rho_theta(rho, theta)
}

/// Float bounds check; see [`intersect_within_bounds`].
fn is_inside(p: &Point2d, width: usize, height: usize) -> bool {
    p.x >= 0.0 && p.x < width as f64 && p.y >= 0.0 && p.y < height as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn orthogonal_lines_intersect() {
        let p = intersect(
            Point2d::rho_theta(5.0, 0.0),
            Point2d::rho_theta(5.0, FRAC_PI_2),
        )
        .expect("orthogonal lines intersect");
        assert_abs_diff_eq!(p.x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        assert!(intersect(Point2d::rho_theta(5.0, 0.3), Point2d::rho_theta(9.0, 0.3)).is_none());
        assert!(intersect(
            Point2d::rho_theta(1.0, 0.3),
            Point2d::rho_theta(1.0, 0.3 + 5e-5)
        )
        .is_none());
    }

    #[test]
    fn bounded_intersection_is_translated_and_clipped() {
        let center = Point2d::new(10.0, 10.0);
        let p = intersect_within_bounds(
            center,
            Point2d::rho_theta(5.0, 0.0),
            Point2d::rho_theta(-5.0, FRAC_PI_2),
            20,
            20,
        )
        .expect("inside");
        assert_abs_diff_eq!(p.x, 15.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 5.0, epsilon = 1e-9);

        assert!(intersect_within_bounds(
            center,
            Point2d::rho_theta(15.0, 0.0),
            Point2d::rho_theta(0.0, FRAC_PI_2),
            20,
            20,
        )
        .is_none());

        // x = -0.5 truncates to column 0 but is still outside
        assert!(intersect_within_bounds(
            center,
            Point2d::rho_theta(-10.5, 0.0),
            Point2d::rho_theta(0.0, FRAC_PI_2),
            20,
            20,
        )
        .is_none());
    }

    #[test]
    fn pairwise_intersections_follow_input_order() {
        let center = Point2d::new(50.0, 50.0);
        let lines = [
            Point2d::rho_theta(-20.0, FRAC_PI_2),
            Point2d::rho_theta(20.0, 0.0),
            Point2d::rho_theta(20.0, FRAC_PI_2),
            Point2d::rho_theta(-20.0, 0.0),
        ];
        let pts = all_pairwise_intersections(center, &lines, 100, 100);
        // The two horizontal and the two vertical pairs are parallel.
        assert_eq!(pts.len(), 4);
        assert_abs_diff_eq!(pts[0].x, 70.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pts[0].y, 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pts[1].x, 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pts[1].y, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn closest_point_projects_orthogonally() {
        let p = closest_point_on_line(
            Point2d::new(0.0, 0.0),
            Point2d::new(10.0, 10.0),
            Point2d::new(10.0, 0.0),
        );
        assert_abs_diff_eq!(p.x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn horizontal_segment_has_vertical_normal() {
        let center = Point2d::new(24.5, 24.5);
        let rt = line_rho_theta(center, Point2d::new(1.0, 10.0), Point2d::new(48.0, 10.0));
        assert_abs_diff_eq!(rt.theta(), FRAC_PI_2, epsilon = 1e-9);
        assert_abs_diff_eq!(rt.rho(), -14.5, epsilon = 1e-9);

        let back = nearest_point(center, rt);
        assert_abs_diff_eq!(back.y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn line_through_center_uses_segment_normal() {
        let center = Point2d::new(5.0, 5.0);
        let rt = line_rho_theta(center, Point2d::new(0.0, 5.0), Point2d::new(10.0, 5.0));
        assert_abs_diff_eq!(rt.rho(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rt.theta(), FRAC_PI_2, epsilon = 1e-9);

        let diag = line_rho_theta(center, Point2d::new(0.0, 0.0), Point2d::new(10.0, 10.0));
        assert_abs_diff_eq!(diag.theta(), 3.0 * FRAC_PI_4, epsilon = 1e-9);
    }

    #[test]
    fn direction_is_orthogonal_to_normal() {
        let rt = Point2d::rho_theta(3.0, 0.7);
        let d = line_direction(rt);
        let n = Point2d::new(rt.theta().cos(), rt.theta().sin());
        assert_abs_diff_eq!(d.dot(&n), 0.0, epsilon = 1e-12);
    }
}
