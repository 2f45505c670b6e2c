use radon_lines::image::NormalizedImage;
use radon_lines::traversal::browse_line;

/// Black image with a single segment of intensity `value` painted in.
pub fn painted_line(
    width: usize,
    height: usize,
    from: (i64, i64),
    to: (i64, i64),
    value: f64,
) -> NormalizedImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = NormalizedImage::new(width, height);
    paint_segment(&mut img, from, to, value);
    img
}

/// Black image with the outline of the axis-aligned rectangle spanning
/// `top_left..=bottom_right` painted white.
pub fn rectangle_outline(
    width: usize,
    height: usize,
    top_left: (i64, i64),
    bottom_right: (i64, i64),
) -> NormalizedImage {
    let mut img = NormalizedImage::new(width, height);
    let (x0, y0) = top_left;
    let (x1, y1) = bottom_right;
    paint_segment(&mut img, (x0, y0), (x1, y0), 1.0);
    paint_segment(&mut img, (x1, y0), (x1, y1), 1.0);
    paint_segment(&mut img, (x1, y1), (x0, y1), 1.0);
    paint_segment(&mut img, (x0, y1), (x0, y0), 1.0);
    img
}

fn paint_segment(img: &mut NormalizedImage, from: (i64, i64), to: (i64, i64), value: f64) {
    let (w, h) = (img.w as i64, img.h as i64);
    browse_line(from.0, from.1, to.0, to.1, |x, y| {
        if (0..w).contains(&x) && (0..h).contains(&y) {
            img.set(x as usize, y as usize, value);
        }
    });
}
