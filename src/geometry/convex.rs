//! Brute-force convex ordering of a handful of polygon vertices.
//!
//! The search is O(n!) and is meant for the four corners produced by
//! intersecting four detected lines. Inputs above [`CONVEX_ORDERING_MAX_VERTICES`]
//! are rejected without searching.

use super::Point2d;
use log::warn;

/// Largest vertex count the permutation search accepts (8! orderings).
pub const CONVEX_ORDERING_MAX_VERTICES: usize = 8;

/// Cross product of `(p2 - p1)` and `(p3 - p1)`.
#[inline]
pub fn vector_product(p1: Point2d, p2: Point2d, p3: Point2d) -> f64 {
    let d1 = p2 - p1;
    let d2 = p3 - p1;
    d1.x * d2.y - d2.x * d1.y
}

/// `true` when every consecutive triple (wrapping around) turns the same way
/// and none is collinear.
pub fn is_convex_polygon(vertices: &[Point2d]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut expected = 0.0f64;
    for i in 0..n {
        let turn = vector_product(vertices[i], vertices[(i + 1) % n], vertices[(i + 2) % n]);
        let sign = sign_of(turn);
        if sign == 0.0 {
            return false;
        }
        if i == 0 {
            expected = sign;
        } else if sign != expected {
            return false;
        }
    }
    true
}

/// First permutation of `vertices` (in lexicographic index order) that traces
/// a convex polygon, or an empty vector if there are fewer than three or more
/// than [`CONVEX_ORDERING_MAX_VERTICES`] vertices, or no ordering is convex.
pub fn convex_ordering(vertices: &[Point2d]) -> Vec<Point2d> {
    if vertices.len() < 3 {
        return Vec::new();
    }
    if vertices.len() > CONVEX_ORDERING_MAX_VERTICES {
        warn!(
            "convex_ordering: {} vertices exceed the limit of {}, skipping",
            vertices.len(),
            CONVEX_ORDERING_MAX_VERTICES
        );
        return Vec::new();
    }
    Permutations::new(vertices)
        .find(|candidate| is_convex_polygon(candidate))
        .unwrap_or_default()
}

/// Lazily enumerates all permutations of a slice in lexicographic order of
/// the element positions, i.e. the order a backtracking search produces by
/// fixing the first free element first.
pub struct Permutations<'a, T> {
    items: &'a [T],
    order: Vec<usize>,
    done: bool,
}

impl<'a, T: Clone> Permutations<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self {
            items,
            order: (0..items.len()).collect(),
            done: items.is_empty(),
        }
    }

    /// Rearranges `order` into its lexicographic successor. Returns `false`
    /// once the last permutation has been produced.
    fn advance(&mut self) -> bool {
        let n = self.order.len();
        if n < 2 {
            return false;
        }
        let mut i = n - 1;
        while i > 0 && self.order[i - 1] >= self.order[i] {
            i -= 1;
        }
        if i == 0 {
            return false;
        }
        let mut j = n - 1;
        while self.order[j] <= self.order[i - 1] {
            j -= 1;
        }
        self.order.swap(i - 1, j);
        self.order[i..].reverse();
        true
    }
}

impl<'a, T: Clone> Iterator for Permutations<'a, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }
        let current = self.order.iter().map(|&i| self.items[i].clone()).collect();
        self.done = !self.advance();
        Some(current)
    }
}

#[inline]
fn sign_of(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
