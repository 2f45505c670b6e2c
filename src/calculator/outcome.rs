use super::params::RadonParams;
use crate::diagnostics::{RadonReport, TimingBreakdown};
use crate::geometry::Point2d;
use crate::polygon::{detect_quadrilateral, Quadrilateral};
use crate::transform::{Peak, TransformResult};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Terminal state of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    Succeeded,
    /// At least one task ended with an error.
    Failed,
    TimedOut,
    Cancelled,
}

impl RunStatus {
    /// Failure outranks timeout, which outranks cancellation.
    pub fn classify(successes: usize, dispatched: usize, timed_out: bool, cancelled: bool) -> Self {
        if successes != dispatched {
            RunStatus::Failed
        } else if timed_out {
            RunStatus::TimedOut
        } else if cancelled {
            RunStatus::Cancelled
        } else {
            RunStatus::Succeeded
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunStatus::Succeeded => "succeeded",
            RunStatus::Failed => "failed",
            RunStatus::TimedOut => "timedOut",
            RunStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Everything a finished run produced.
///
/// `timed_out` reports whether the internal deadline was hit, independently
/// of `status`: a run with failed tasks is `Failed` even if it also timed out.
#[derive(Debug)]
pub struct RadonOutcome {
    pub status: RunStatus,
    pub succeeded: bool,
    pub timed_out: bool,
    pub cancelled: bool,
    pub processing_time_ms: f64,
    pub tasks_dispatched: usize,
    pub successes: usize,
    pub timings: TimingBreakdown,
    pub width: usize,
    pub height: usize,
    pub image_center: Point2d,
    pub result: Arc<TransformResult>,
}

impl RadonOutcome {
    /// Message describing an unsuccessful run, `None` on success.
    pub fn status_text(&self) -> Option<String> {
        match self.status {
            RunStatus::Succeeded => None,
            RunStatus::Failed => Some(format!(
                "ERROR ( {} / {} )",
                self.successes, self.tasks_dispatched
            )),
            RunStatus::TimedOut => Some(format!(
                "Timeout ( after {} ms )",
                self.processing_time_ms.round() as u64
            )),
            RunStatus::Cancelled => Some("Cancelled by user".to_string()),
        }
    }

    /// Strongest distinct lines selected with `params`.
    pub fn top_lines(&self, params: &RadonParams) -> Vec<Peak> {
        self.result.top_lines(
            params.top_lines,
            params.line_filter(),
            params.merge_tolerance_for(self.result.discretization()),
        )
    }

    pub fn quadrilateral(&self, params: &RadonParams) -> Quadrilateral {
        detect_quadrilateral(&self.result, self.image_center, params)
    }

    pub fn report(&self, params: &RadonParams) -> RadonReport {
        let quad = self.quadrilateral(params);
        RadonReport {
            status: self.status.to_string(),
            status_text: self.status_text(),
            succeeded: self.succeeded,
            timed_out: self.timed_out,
            cancelled: self.cancelled,
            processing_time_ms: self.processing_time_ms,
            tasks_dispatched: self.tasks_dispatched,
            successes: self.successes,
            image_width: self.width,
            image_height: self.height,
            image_center: self.image_center,
            accumulator_size: self.result.discretization().num_buckets,
            max: self.result.max(),
            top_lines: quad.lines,
            quadrilateral: quad.corners,
            timings: self.timings.clone(),
        }
    }
}
