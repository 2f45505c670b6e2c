//! Drawing detected lines and polygons onto an RGB copy of the input.
use crate::geometry::{line_direction, nearest_point, Point2d};
use crate::traversal::browse_line;
use image::{Rgb, RgbImage};

pub const LINE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const POLYGON_COLOR: Rgb<u8> = Rgb([0, 200, 0]);

/// Paints the infinite line `rho_theta` (relative to `center`) across the
/// whole image.
pub fn draw_line(canvas: &mut RgbImage, center: Point2d, rho_theta: Point2d, color: Rgb<u8>) {
    let reach = (canvas.width() + canvas.height()) as f64;
    let foot = nearest_point(center, rho_theta);
    let dir = line_direction(rho_theta);
    let a = foot + dir * reach;
    let b = foot - dir * reach;
    draw_segment(canvas, a, b, color);
}

/// Paints the segment `a → b`, clipped to the canvas.
pub fn draw_segment(canvas: &mut RgbImage, a: Point2d, b: Point2d, color: Rgb<u8>) {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    browse_line(
        a.x.round() as i64,
        a.y.round() as i64,
        b.x.round() as i64,
        b.y.round() as i64,
        |x, y| {
            if (0..w).contains(&x) && (0..h).contains(&y) {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        },
    );
}

/// Paints the closed polygon through `corners`.
pub fn draw_polygon(canvas: &mut RgbImage, corners: &[Point2d], color: Rgb<u8>) {
    for (i, &a) in corners.iter().enumerate() {
        let b = corners[(i + 1) % corners.len()];
        draw_segment(canvas, a, b, color);
    }
}
