//! Discretized accumulator of the Radon transform and peak selection.

mod discretization;
mod peaks;
mod result;

pub use discretization::Discretization;
pub use peaks::{accept_all, axis_aligned_filter, Peak, TopLinesCollector, DEFAULT_MERGE_TOLERANCE};
pub use result::{Plane, TransformResult};
