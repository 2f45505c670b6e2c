//! Owned single-channel f64 grid in row-major layout (stride == width).
//!
//! Used both for normalized input images (values in `[0, 1]`, negative values
//! mark pixels without data) and for finished transform planes.
use super::traits::ImageView;
use crate::error::RadonError;

/// Sentinel stored in cells that carry no data.
pub const NO_DATA: f64 = -1.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Grid2d {
    /// Grid width in cells
    pub w: usize,
    /// Grid height in cells
    pub h: usize,
    /// Number of f64 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f64>,
}

/// Normalized grayscale input: intensities in `[0, 1]`, [`NO_DATA`] where
/// the pixel is undefined.
pub type NormalizedImage = Grid2d;

impl Grid2d {
    /// Construct a zero-initialized grid of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, 0.0)
    }

    /// Construct a grid with every cell set to `value`.
    pub fn filled(w: usize, h: usize, value: f64) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![value; w * h],
        }
    }

    /// Wrap row-major `data`; its length must be exactly `w * h`.
    pub fn from_vec(w: usize, h: usize, data: Vec<f64>) -> Result<Self, RadonError> {
        if data.len() != w * h {
            return Err(RadonError::DimensionMismatch {
                expected_w: w,
                expected_h: h,
                got_w: data.len(),
                got_h: 1,
            });
        }
        Ok(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    #[inline]
    /// Get the value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[self.idx(x, y)]
    }

    /// Value at (x, y), `None` outside the grid.
    pub fn try_get(&self, x: i64, y: i64) -> Option<f64> {
        if x < 0 || y < 0 || x as usize >= self.w || y as usize >= self.h {
            return None;
        }
        Some(self.get(x as usize, y as usize))
    }

    #[inline]
    /// Set the value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f64) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// New grid of the same shape with `f` applied to every cell.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self {
            w: self.w,
            h: self.h,
            stride: self.w,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

impl ImageView for Grid2d {
    type Pixel = f64;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[f64] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
