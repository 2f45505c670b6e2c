use crate::error::RadonError;
use crate::image::NormalizedImage;
use crate::traversal::browse_line;

/// Intensity gathered along one rasterized line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineIntegral {
    pub accumulation: f64,
    /// Pixels that carried data.
    pub count: usize,
}

impl LineIntegral {
    /// Adds a pixel; negative (no-data) values are skipped.
    #[inline]
    pub fn add(&mut self, value: f64) {
        if value >= 0.0 {
            self.accumulation += value;
            self.count += 1;
        }
    }
}

/// Per-line integration policy used by sweep tasks.
pub trait LineIntegrator: Send + Sync {
    fn integrate(
        &self,
        image: &NormalizedImage,
        start: (i64, i64),
        end: (i64, i64),
    ) -> Result<LineIntegral, RadonError>;
}

/// Sums pixel intensities over the rasterized segment.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntensitySum;

impl LineIntegrator for IntensitySum {
    fn integrate(
        &self,
        image: &NormalizedImage,
        start: (i64, i64),
        end: (i64, i64),
    ) -> Result<LineIntegral, RadonError> {
        let mut integral = LineIntegral::default();
        let mut outside = None;
        browse_line(start.0, start.1, end.0, end.1, |x, y| {
            match image.try_get(x, y) {
                Some(v) => integral.add(v),
                None => {
                    outside.get_or_insert((x, y));
                }
            }
        });
        if let Some((x, y)) = outside {
            return Err(RadonError::LineIntegration {
                start_x: start.0,
                start_y: start.1,
                end_x: end.0,
                end_y: end.1,
                reason: format!("pixel ({x}, {y}) is outside the {}x{} image", image.w, image.h),
            });
        }
        Ok(integral)
    }
}
