//! Digital line rasterization.
//!
//! The axis with the larger extent is the long axis; every long-axis step
//! emits exactly one pixel. Along the short axis the segment is split into
//! rows centred on the ideal line, with a half-width first and last row so
//! both end points are emitted exactly once. Row boundaries are computed in
//! integer arithmetic, so a segment and its reverse cover the same pixels.

/// Visits the pixels of the segment `(x1, y1) → (x2, y2)` in order, starting
/// at `(x1, y1)` and ending at `(x2, y2)`.
pub fn browse_line<F>(x1: i64, y1: i64, x2: i64, y2: i64, mut visit: F)
where
    F: FnMut(i64, i64),
{
    if (x2 - x1).abs() >= (y2 - y1).abs() {
        browse_long_axis(x1, y1, x2, y2, &mut |l, s| visit(l, s));
    } else {
        browse_long_axis(y1, x1, y2, x2, &mut |l, s| visit(s, l));
    }
}

/// Collects [`browse_line`] into a vector.
pub fn rasterize_line(x1: i64, y1: i64, x2: i64, y2: i64) -> Vec<(i64, i64)> {
    let len = (x2 - x1).abs().max((y2 - y1).abs()) as usize + 1;
    let mut out = Vec::with_capacity(len);
    browse_line(x1, y1, x2, y2, |x, y| out.push((x, y)));
    out
}

fn browse_long_axis(
    long1: i64,
    short1: i64,
    long2: i64,
    short2: i64,
    visit: &mut dyn FnMut(i64, i64),
) {
    if short1 == short2 {
        walk(long1, long2, short1, visit);
        return;
    }

    // Rows are always laid out from the smaller short coordinate so that both
    // directions share the same boundaries; the reversed case is replayed
    // backwards.
    let reversed = short1 > short2;
    let (l0, s0, l1, s1) = if reversed {
        (long2, short2, long1, short1)
    } else {
        (long1, short1, long2, short2)
    };
    let rows = s1 - s0;
    let dl = l1 - l0;
    let dir = if dl < 0 { -1 } else { 1 };
    let den = 2 * rows;

    // Last long coordinate of row `k` (k < rows): the ideal line crosses the
    // boundary between rows k and k+1 at l0 + dl·(2k+1)/(2·rows).
    let row_end = |k: i64| -> i64 {
        let num = dl * (2 * k + 1);
        if dir > 0 {
            l0 + num.div_euclid(den)
        } else {
            l0 - (-num).div_euclid(den)
        }
    };
    let row = |k: i64| -> (i64, i64) {
        let from = if k == 0 { l0 } else { row_end(k - 1) + dir };
        let to = if k == rows { l1 } else { row_end(k) };
        (from, to)
    };

    if reversed {
        for k in (0..=rows).rev() {
            let (from, to) = row(k);
            walk(to, from, s0 + k, visit);
        }
    } else {
        for k in 0..=rows {
            let (from, to) = row(k);
            walk(from, to, s0 + k, visit);
        }
    }
}

#[inline]
fn walk(from: i64, to: i64, short: i64, visit: &mut dyn FnMut(i64, i64)) {
    if from <= to {
        for l in from..=to {
            visit(l, short);
        }
    } else {
        for l in (to..=from).rev() {
            visit(l, short);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_connected(pixels: &[(i64, i64)]) {
        for pair in pixels.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(
                (a.0 - b.0).abs() <= 1 && (a.1 - b.1).abs() <= 1 && a != b,
                "gap between {:?} and {:?} in {:?}",
                a,
                b,
                pixels
            );
        }
    }

    #[test]
    fn single_point_line_emits_one_pixel() {
        assert_eq!(rasterize_line(4, 7, 4, 7), vec![(4, 7)]);
    }

    #[test]
    fn horizontal_and_vertical_lines() {
        assert_eq!(rasterize_line(1, 3, 4, 3), vec![(1, 3), (2, 3), (3, 3), (4, 3)]);
        assert_eq!(rasterize_line(2, 5, 2, 2), vec![(2, 5), (2, 4), (2, 3), (2, 2)]);
    }

    #[test]
    fn diagonal_line_steps_both_axes() {
        assert_eq!(rasterize_line(0, 0, 3, 3), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn shallow_line_uses_half_rows_at_the_ends() {
        let px = rasterize_line(0, 0, 10, 2);
        let rows: Vec<i64> = px.iter().map(|p| p.1).collect();
        assert_eq!(rows, vec![0, 0, 0, 1, 1, 1, 1, 1, 2, 2, 2]);
        let xs: Vec<i64> = px.iter().map(|p| p.0).collect();
        assert_eq!(xs, (0..=10).collect::<Vec<_>>());
    }

    #[test]
    fn steep_line_swaps_axes() {
        let px = rasterize_line(3, 0, 1, 9);
        assert_eq!(px.len(), 10);
        assert_eq!(px.first(), Some(&(3, 0)));
        assert_eq!(px.last(), Some(&(1, 9)));
        let ys: Vec<i64> = px.iter().map(|p| p.1).collect();
        assert_eq!(ys, (0..=9).collect::<Vec<_>>());
        assert_connected(&px);
    }

    #[test]
    fn reversed_segment_is_reverse_sequence() {
        let ends = [(0, 0), (9, 2), (-3, 7), (5, -4), (1, 12), (13, 13), (6, 0)];
        for &a in &ends {
            for &b in &ends {
                let forward = rasterize_line(a.0, a.1, b.0, b.1);
                let mut backward = rasterize_line(b.0, b.1, a.0, a.1);
                backward.reverse();
                assert_eq!(forward, backward, "segment {:?} -> {:?}", a, b);

                let unique: HashSet<_> = forward.iter().collect();
                assert_eq!(unique.len(), forward.len());
                let expected = (a.0 - b.0).abs().max((a.1 - b.1).abs()) as usize + 1;
                assert_eq!(forward.len(), expected);
                assert_eq!(forward.first(), Some(&a));
                assert_eq!(forward.last(), Some(&b));
                assert_connected(&forward);
            }
        }
    }
}
