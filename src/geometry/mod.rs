//! Geometry kernel: points, polar-line intersections, projections and convex
//! vertex ordering.
//!
//! All functions are free and stateless.

mod convex;
mod lines;
mod point;

pub use convex::{
    convex_ordering, is_convex_polygon, vector_product, Permutations, CONVEX_ORDERING_MAX_VERTICES,
};
pub use lines::{
    all_pairwise_intersections, closest_point_on_line, intersect, intersect_within_bounds,
    line_direction, line_rho_theta, nearest_point, PARALLEL_DET_EPS,
};
pub use point::Point2d;
