use super::discretization::Discretization;
use super::peaks::{accept_all, Peak, TopLinesCollector, DEFAULT_MERGE_TOLERANCE};
use crate::accumulator::{Accumulator, AtomicGrid};
use crate::error::RadonError;
use crate::geometry::Point2d;
use crate::image::{Grid2d, NO_DATA};
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// Which accumulator plane to read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plane {
    /// Maximum raw line integral per bucket.
    Raw,
    /// Maximum mean intensity (integral / contributing pixels) per bucket.
    Normalized,
}

#[derive(Debug)]
struct Sealed {
    max: Option<Peak>,
    standardized: Grid2d,
}

/// Accumulated Radon transform of one image.
///
/// Written concurrently through [`TransformResult::set`] while sweep tasks
/// run, then sealed exactly once by [`TransformResult::finish`], which
/// records the global maximum and derives the standardized plane.
#[derive(Debug)]
pub struct TransformResult {
    disc: Discretization,
    image_width: usize,
    image_height: usize,
    raw: AtomicGrid,
    normalized: AtomicGrid,
    finished: AtomicBool,
    sealed: OnceLock<Sealed>,
}

impl TransformResult {
    /// Empty result for an image of `width × height`; every bucket holds the
    /// no-data sentinel.
    pub fn new(width: usize, height: usize) -> Self {
        let disc = Discretization::from_image_size(width, height);
        let n = disc.num_buckets;
        Self {
            disc,
            image_width: width,
            image_height: height,
            raw: AtomicGrid::new(n, n, NO_DATA),
            normalized: AtomicGrid::new(n, n, NO_DATA),
            finished: AtomicBool::new(false),
            sealed: OnceLock::new(),
        }
    }

    pub fn discretization(&self) -> &Discretization {
        &self.disc
    }

    pub fn image_size(&self) -> (usize, usize) {
        (self.image_width, self.image_height)
    }

    /// Max-writes `accumulation` into the raw plane and `accumulation / count`
    /// into the normalized plane (only when `count > 0`).
    ///
    /// Returns `false` and leaves the result untouched when `rho` falls
    /// outside the discretized range.
    pub fn set(&self, rho_theta: Point2d, accumulation: f64, count: usize) -> bool {
        let Some(ri) = self.disc.rho_index(rho_theta.rho()) else {
            return false;
        };
        let ti = self.disc.theta_index(rho_theta.theta());
        self.raw.set(ri, ti, accumulation);
        if count > 0 {
            self.normalized.set(ri, ti, accumulation / count as f64);
        }
        true
    }

    /// Seals the result. A second call fails with
    /// [`RadonError::AlreadyFinished`].
    pub fn finish(&self) -> Result<(), RadonError> {
        if self.finished.swap(true, Ordering::AcqRel) {
            return Err(RadonError::AlreadyFinished);
        }
        let max = self
            .top_lines(1, accept_all, DEFAULT_MERGE_TOLERANCE)
            .into_iter()
            .next();
        let factor = match max {
            Some(peak) if peak.value > 0.0 => 1.0 / peak.value,
            _ => 1.0,
        };
        let standardized = self
            .raw
            .snapshot()
            .map(|v| if v >= 0.0 { v * factor } else { v });
        debug!(
            "TransformResult::finish buckets={} max={:?}",
            self.disc.num_buckets, max
        );
        let _ = self.sealed.set(Sealed { max, standardized });
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.sealed.get().is_some()
    }

    /// Strongest peak recorded by [`finish`](Self::finish).
    pub fn max(&self) -> Option<Peak> {
        self.sealed.get().and_then(|s| s.max)
    }

    /// Raw plane divided by the global maximum; `None` until finished.
    pub fn standardized(&self) -> Option<&Grid2d> {
        self.sealed.get().map(|s| &s.standardized)
    }

    pub fn raw(&self) -> &AtomicGrid {
        &self.raw
    }

    pub fn normalized(&self) -> &AtomicGrid {
        &self.normalized
    }

    fn plane(&self, plane: Plane) -> &AtomicGrid {
        match plane {
            Plane::Raw => &self.raw,
            Plane::Normalized => &self.normalized,
        }
    }

    fn lookup(&self, rho_theta: Point2d) -> Option<(usize, usize)> {
        let ri = self.disc.rho_index(rho_theta.rho())?;
        Some((ri, self.disc.theta_index(rho_theta.theta())))
    }

    /// Raw bucket value at `(rho, theta)`, `None` when rho is out of range.
    pub fn transform_at(&self, rho_theta: Point2d) -> Option<f64> {
        self.lookup(rho_theta).map(|(r, t)| self.raw.get(r, t))
    }

    pub fn normalized_at(&self, rho_theta: Point2d) -> Option<f64> {
        self.lookup(rho_theta).map(|(r, t)| self.normalized.get(r, t))
    }

    pub fn standardized_at(&self, rho_theta: Point2d) -> Option<f64> {
        let grid = self.standardized()?;
        self.lookup(rho_theta).map(|(r, t)| grid.get(r, t))
    }

    pub fn index_to_rho_theta(&self, rho_index: usize, theta_index: usize) -> Point2d {
        self.disc.index_to_rho_theta(rho_index, theta_index)
    }

    /// Up to `k` distinct strongest lines of the raw plane.
    pub fn top_lines<F>(&self, k: usize, filter: F, tolerance: Point2d) -> Vec<Peak>
    where
        F: Fn(&Point2d) -> bool,
    {
        self.top_lines_in(Plane::Raw, k, filter, tolerance)
    }

    /// Same as [`top_lines`](Self::top_lines) over an arbitrary plane.
    pub fn top_lines_in<F>(&self, plane: Plane, k: usize, filter: F, tolerance: Point2d) -> Vec<Peak>
    where
        F: Fn(&Point2d) -> bool,
    {
        let mut collector = TopLinesCollector::new(k, filter, tolerance);
        self.plane(plane).for_each(|ri, ti, value| {
            if collector.accepts(value) {
                collector.offer(self.disc.index_to_rho_theta(ri, ti), value);
            }
        });
        collector.into_peaks()
    }
}
