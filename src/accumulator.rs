//! Two-dimensional accumulators indexed by `(rho_index, theta_index)`.
//!
//! [`AtomicGrid`] is written concurrently by sweep tasks. Every write is a
//! max-write: a cell only ever grows, so the final content does not depend
//! on task interleaving. [`Grid2d`] is the plain single-writer variant.
pub use crate::image::Grid2d;
use crate::image::ImageView;
use std::sync::atomic::{AtomicU64, Ordering};

/// Read access shared by plain and concurrent accumulators. The x axis spans
/// rho buckets, the y axis spans theta buckets.
pub trait Accumulator {
    fn rho_len(&self) -> usize;
    fn theta_len(&self) -> usize;

    /// Value at `(x, y)`. Panics when out of range.
    fn value(&self, x: usize, y: usize) -> f64;

    /// Row-major traversal (theta rows, rho within a row) yielding
    /// `(rho_index, theta_index, value)`.
    fn for_each<F: FnMut(usize, usize, f64)>(&self, mut visitor: F)
    where
        Self: Sized,
    {
        for y in 0..self.theta_len() {
            for x in 0..self.rho_len() {
                visitor(x, y, self.value(x, y));
            }
        }
    }
}

impl Accumulator for Grid2d {
    fn rho_len(&self) -> usize {
        self.w
    }
    fn theta_len(&self) -> usize {
        self.h
    }
    fn value(&self, x: usize, y: usize) -> f64 {
        self.get(x, y)
    }
    fn for_each<F: FnMut(usize, usize, f64)>(&self, mut visitor: F) {
        for (y, row) in self.rows().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                visitor(x, y, v);
            }
        }
    }
}

/// Concurrency-safe grid of `f64` stored as raw bits in `AtomicU64` cells.
#[derive(Debug)]
pub struct AtomicGrid {
    w: usize,
    h: usize,
    cells: Vec<AtomicU64>,
}

impl AtomicGrid {
    /// Grid of size `w × h` with every cell set to `initial`.
    pub fn new(w: usize, h: usize, initial: f64) -> Self {
        let bits = initial.to_bits();
        Self {
            w,
            h,
            cells: (0..w * h).map(|_| AtomicU64::new(bits)).collect(),
        }
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    /// Raises cell `(x, y)` to `value` if `value` is larger. NaN never wins.
    ///
    /// Returns `false` when the coordinates are outside the grid.
    pub fn set(&self, x: usize, y: usize, value: f64) -> bool {
        if x >= self.w || y >= self.h {
            return false;
        }
        let cell = &self.cells[self.idx(x, y)];
        // CAS loop: fetch_update retries until no other writer raced us.
        let _ = cell.fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
            (value > f64::from_bits(bits)).then(|| value.to_bits())
        });
        true
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        f64::from_bits(self.cells[self.idx(x, y)].load(Ordering::Acquire))
    }

    /// Plain copy of the current contents.
    pub fn snapshot(&self) -> Grid2d {
        Grid2d {
            w: self.w,
            h: self.h,
            stride: self.w,
            data: self
                .cells
                .iter()
                .map(|c| f64::from_bits(c.load(Ordering::Acquire)))
                .collect(),
        }
    }
}

impl Accumulator for AtomicGrid {
    fn rho_len(&self) -> usize {
        self.w
    }
    fn theta_len(&self) -> usize {
        self.h
    }
    fn value(&self, x: usize, y: usize) -> f64 {
        self.get(x, y)
    }
}
