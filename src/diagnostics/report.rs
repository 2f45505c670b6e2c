use super::timing::TimingBreakdown;
use crate::geometry::Point2d;
use crate::transform::Peak;
use serde::Serialize;

/// Serializable summary of a finished run, written by the demo.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadonReport {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    pub succeeded: bool,
    pub timed_out: bool,
    pub cancelled: bool,
    pub processing_time_ms: f64,
    pub tasks_dispatched: usize,
    pub successes: usize,
    pub image_width: usize,
    pub image_height: usize,
    pub image_center: Point2d,
    pub accumulator_size: usize,
    pub max: Option<Peak>,
    pub top_lines: Vec<Peak>,
    pub quadrilateral: Vec<Point2d>,
    pub timings: TimingBreakdown,
}
