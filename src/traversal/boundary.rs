use crate::geometry::Point2d;
use serde::Serialize;
use std::fmt;

/// One side of the interior pixel rectangle of an image. The outermost
/// one-pixel frame is excluded so that no candidate line runs along the
/// image border itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BoundaryEdge {
    North,
    South,
    East,
    West,
}

impl BoundaryEdge {
    pub const ALL: [BoundaryEdge; 4] = [
        BoundaryEdge::North,
        BoundaryEdge::East,
        BoundaryEdge::South,
        BoundaryEdge::West,
    ];
}

impl fmt::Display for BoundaryEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoundaryEdge::North => "N",
            BoundaryEdge::South => "S",
            BoundaryEdge::East => "E",
            BoundaryEdge::West => "W",
        };
        f.write_str(name)
    }
}

/// Enumerates the interior boundary pixels of a `width × height` image.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryPixelBrowser {
    width: usize,
    height: usize,
}

impl BoundaryPixelBrowser {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Lazy, ordered pixels of one edge:
    /// - North: `(x, 1)`, South: `(x, height-2)` for `x ∈ [1, width-2]`
    /// - West: `(1, y)`, East: `(width-2, y)` for `y ∈ [1, height-2]`
    pub fn pixels(&self, edge: BoundaryEdge) -> EdgePixels {
        let w = self.width as i64;
        let h = self.height as i64;
        let (fixed, end, horizontal) = match edge {
            BoundaryEdge::North => (1, w - 1, true),
            BoundaryEdge::South => (h - 2, w - 1, true),
            BoundaryEdge::West => (1, h - 1, false),
            BoundaryEdge::East => (w - 2, h - 1, false),
        };
        EdgePixels {
            next: 1,
            end,
            fixed,
            horizontal,
        }
    }

    /// Number of pixels on `edge`.
    pub fn len(&self, edge: BoundaryEdge) -> usize {
        let span = match edge {
            BoundaryEdge::North | BoundaryEdge::South => self.width,
            BoundaryEdge::East | BoundaryEdge::West => self.height,
        };
        span.saturating_sub(2)
    }

    /// Visits the pixels of `edge` until `visitor` returns `false`.
    ///
    /// Returns `true` if the whole edge was visited.
    pub fn browse<F>(&self, edge: BoundaryEdge, mut visitor: F) -> bool
    where
        F: FnMut(Point2d) -> bool,
    {
        self.pixels(edge).all(|p| visitor(p))
    }
}

/// Iterator over the pixels of one boundary edge.
#[derive(Clone, Debug)]
pub struct EdgePixels {
    next: i64,
    end: i64,
    fixed: i64,
    horizontal: bool,
}

impl Iterator for EdgePixels {
    type Item = Point2d;

    fn next(&mut self) -> Option<Point2d> {
        if self.next >= self.end {
            return None;
        }
        let v = self.next as f64;
        self.next += 1;
        let fixed = self.fixed as f64;
        Some(if self.horizontal {
            Point2d::new(v, fixed)
        } else {
            Point2d::new(fixed, v)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.end - self.next).max(0) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for EdgePixels {}
