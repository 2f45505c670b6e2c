#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod calculator;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod polygon;
pub mod transform;

// Building blocks – public so callers can reuse them outside a full run.
pub mod accumulator;
pub mod angle;
pub mod config;
pub mod geometry;
pub mod traversal;

// --- High-level re-exports -------------------------------------------------

// Main entry points: calculator + results.
pub use crate::calculator::{Completion, RadonCalculator, RadonExecutor, RadonOutcome, RadonParams};
pub use crate::transform::{Peak, TransformResult};

pub use crate::diagnostics::RadonReport;
pub use crate::error::{CompletionError, RadonError};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use radon_lines::prelude::*;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # fn main() {
/// let mut image = NormalizedImage::new(50, 50);
/// for x in 10..=40 {
///     image.set(x, 10, 1.0);
/// }
///
/// let calculator = RadonCalculator::new(Arc::new(InlineExecutor));
/// let outcome = calculator.process(image, Duration::from_secs(30)).unwrap();
/// let best = outcome.result.top_lines(1, accept_all, DEFAULT_MERGE_TOLERANCE);
/// println!("status={:?} best={:?}", outcome.status, best.first());
/// # }
/// ```
pub mod prelude {
    pub use crate::calculator::{InlineExecutor, RadonCalculator, RadonExecutor, RadonParams};
    pub use crate::geometry::Point2d;
    pub use crate::image::NormalizedImage;
    pub use crate::transform::{accept_all, axis_aligned_filter, DEFAULT_MERGE_TOLERANCE};
}
