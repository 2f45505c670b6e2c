//! From detected lines back to image-space polygons.

use crate::calculator::RadonParams;
use crate::geometry::{all_pairwise_intersections, convex_ordering, Point2d};
use crate::transform::{Peak, TransformResult};
use log::debug;
use serde::Serialize;

/// Lines selected from a transform and the convex polygon they enclose.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quadrilateral {
    pub lines: Vec<Peak>,
    /// Convex traversal of the in-image intersections; empty when none exists.
    pub corners: Vec<Point2d>,
}

impl Quadrilateral {
    pub fn is_complete(&self) -> bool {
        self.corners.len() == 4
    }
}

/// Picks the strongest axis-aligned lines and orders their in-image
/// intersections into a convex polygon.
pub fn detect_quadrilateral(
    result: &TransformResult,
    center: Point2d,
    params: &RadonParams,
) -> Quadrilateral {
    let lines = result.top_lines(
        params.top_lines,
        params.line_filter(),
        params.merge_tolerance_for(result.discretization()),
    );
    let rho_thetas: Vec<Point2d> = lines.iter().map(|p| p.rho_theta).collect();
    let (width, height) = result.image_size();
    let intersections = all_pairwise_intersections(center, &rho_thetas, width, height);
    let corners = convex_ordering(&intersections);
    debug!(
        "detect_quadrilateral lines={} intersections={} corners={}",
        lines.len(),
        intersections.len(),
        corners.len()
    );
    Quadrilateral { lines, corners }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn rectangle_lines_yield_four_corners() {
        let result = TransformResult::new(40, 40);
        let center = Point2d::new(19.5, 19.5);
        result.set(Point2d::rho_theta(-10.0, 0.0), 30.0, 30);
        result.set(Point2d::rho_theta(10.0, 0.0), 29.0, 30);
        result.set(Point2d::rho_theta(-8.0, FRAC_PI_2), 28.0, 30);
        result.set(Point2d::rho_theta(12.0, FRAC_PI_2), 27.0, 30);
        result.finish().unwrap();

        let quad = detect_quadrilateral(&result, center, &RadonParams::default());
        assert_eq!(quad.lines.len(), 4);
        assert!(quad.is_complete());
        let mut xs: Vec<f64> = quad.corners.iter().map(|c| c.x).collect();
        xs.sort_by(f64::total_cmp);
        assert!((xs[0] - 9.5).abs() < 1e-6 && (xs[3] - 29.5).abs() < 1e-6);
    }

    #[test]
    fn tilted_copies_of_an_edge_do_not_crowd_out_the_others() {
        let result = TransformResult::new(50, 50);
        let step = result.discretization().theta_step;
        let center = Point2d::new(24.5, 24.5);
        result.set(Point2d::rho_theta(15.5, 0.0), 24.0, 24);
        result.set(Point2d::rho_theta(-14.5, 0.0), 24.0, 24);
        result.set(Point2d::rho_theta(10.2, 36.0 * step + 0.01), 25.0, 25);
        result.set(Point2d::rho_theta(10.5, FRAC_PI_2), 31.0, 31);
        result.set(Point2d::rho_theta(-12.5, FRAC_PI_2), 31.0, 31);
        result.set(Point2d::rho_theta(10.2, 39.0 * step + 0.01), 25.0, 25);
        // x = 40 seen from the other side of theta = π
        result.set(Point2d::rho_theta(-15.5, 75.0 * step + 0.01), 24.0, 24);
        result.finish().unwrap();

        let quad = detect_quadrilateral(&result, center, &RadonParams::default());
        assert!(quad.is_complete(), "lines={:?}", quad.lines);
        let mut xs: Vec<f64> = quad.corners.iter().map(|c| c.x).collect();
        let mut ys: Vec<f64> = quad.corners.iter().map(|c| c.y).collect();
        xs.sort_by(f64::total_cmp);
        ys.sort_by(f64::total_cmp);
        assert!((xs[0] - 9.5).abs() < 1e-6 && (xs[3] - 39.5).abs() < 1e-6, "{xs:?}");
        assert!((ys[0] - 11.5).abs() < 1e-6 && (ys[3] - 34.5).abs() < 1e-6, "{ys:?}");
    }

    #[test]
    fn too_many_lines_give_up_on_the_polygon() {
        let result = TransformResult::new(50, 50);
        let center = Point2d::new(24.5, 24.5);
        for (i, rho) in [-18.5, -6.5, 5.5, 17.5].into_iter().enumerate() {
            let value = 30.0 - i as f64;
            result.set(Point2d::rho_theta(rho, 0.0), value, 30);
            result.set(Point2d::rho_theta(rho, FRAC_PI_2), value, 30);
        }
        result.finish().unwrap();

        let params = RadonParams {
            top_lines: 8,
            ..RadonParams::default()
        };
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(detect_quadrilateral(&result, center, &params));
        });
        let quad = rx
            .recv_timeout(std::time::Duration::from_secs(10))
            .expect("bounded search");
        assert_eq!(quad.lines.len(), 8);
        assert!(quad.corners.is_empty());
    }
}
