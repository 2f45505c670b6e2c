//! Concurrent orchestration of a Radon run.
//!
//! Overview
//! - A run validates the image, plans one [`SweepTask`] per start pixel of
//!   each of the six boundary-edge pairs and hands them to a
//!   [`TaskExecutor`] (a rayon pool by default).
//! - Each task rasterizes the lines from its start pixel to every pixel of
//!   the target edge, integrates them with a [`LineIntegrator`] and max-writes
//!   the result into the shared [`TransformResult`](crate::transform::TransformResult).
//! - The coordinator waits on a [`CompletionLatch`] bounded by the run
//!   timeout, seals the result and classifies the run
//!   (failed > timed out > cancelled > succeeded).
//! - The [`RadonOutcome`] is published through a [`Completion`] handle.
//!
//! Cancellation and timeout are cooperative: tasks check the stop condition
//! after every line, and already written cells are kept.
//!
//! Modules
//! - [`params`] – run and line-selection parameters.
//! - `pipeline` – the [`RadonCalculator`] itself.
//! - `launcher` – [`RadonExecutor`], one calculator per image.
//! - `sweep` – task planning and per-task work.
//! - `completion`, `latch` – synchronization primitives.

mod completion;
mod executor;
mod integrate;
mod latch;
mod launcher;
mod outcome;
pub mod params;
mod pipeline;
mod sweep;

pub use completion::{Completion, Settlement};
pub use executor::{build_thread_pool, FnExecutor, InlineExecutor, Job, TaskExecutor};
pub use integrate::{IntensitySum, LineIntegral, LineIntegrator};
pub use latch::CompletionLatch;
pub use launcher::RadonExecutor;
pub use outcome::{RadonOutcome, RunStatus};
pub use params::{RadonParams, MIN_MERGE_THETA_BUCKETS};
pub use pipeline::RadonCalculator;
pub use sweep::{plan_tasks, SweepTask, EDGE_PAIRS};

pub use crate::error::CompletionError;
