//! Error types shared by the transform, the calculator and the completion handle.

use thiserror::Error;

/// Errors raised by the Radon line detector.
///
/// Validation errors (`ImageTooSmall`, `AlreadyRun`) are returned before any
/// task is dispatched. `LineIntegration` and `TaskPanicked` are task-local and
/// only show up in logs and in the `successes` count of a run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RadonError {
    #[error("image {width}x{height} is too small, at least 3x3 pixels are required")]
    ImageTooSmall { width: usize, height: usize },

    #[error("calculator has already been run")]
    AlreadyRun,

    #[error("transform result has already been finished")]
    AlreadyFinished,

    #[error("grid size mismatch: expected {expected_w}x{expected_h}, got {got_w}x{got_h}")]
    DimensionMismatch {
        expected_w: usize,
        expected_h: usize,
        got_w: usize,
        got_h: usize,
    },

    #[error("failed to integrate line ({start_x}, {start_y}) - ({end_x}, {end_y}): {reason}")]
    LineIntegration {
        start_x: i64,
        start_y: i64,
        end_x: i64,
        end_y: i64,
        reason: String,
    },

    #[error("sweep task panicked: {0}")]
    TaskPanicked(String),

    #[error("failed to start worker threads: {0}")]
    ExecutorUnavailable(String),
}

/// Errors returned when waiting on a [`Completion`](crate::calculator::Completion).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompletionError {
    /// The caller-side wait elapsed before the computation settled.
    #[error("timed out waiting for the computation to settle")]
    Timeout,

    #[error("computation was cancelled")]
    Cancelled,

    #[error("computation failed: {0}")]
    Failed(RadonError),
}
