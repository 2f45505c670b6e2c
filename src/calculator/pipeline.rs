//! The calculator driving one Radon run end-to-end.
//!
//! Typical usage:
//! ```no_run
//! use radon_lines::calculator::RadonCalculator;
//! use radon_lines::image::NormalizedImage;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # fn example(image: NormalizedImage) -> Result<(), Box<dyn std::error::Error>> {
//! let pool = rayon::ThreadPoolBuilder::new().build()?;
//! let calculator = RadonCalculator::new(Arc::new(pool));
//! let handle = calculator.run(image, Duration::from_secs(10))?;
//! let outcome = handle.wait()?;
//! println!("{:?} in {:.1} ms", outcome.status, outcome.processing_time_ms);
//! # Ok(())
//! # }
//! ```
use super::completion::Completion;
use super::executor::TaskExecutor;
use super::integrate::{IntensitySum, LineIntegrator};
use super::latch::CompletionLatch;
use super::outcome::{RadonOutcome, RunStatus};
use super::sweep::{plan_tasks, StopSignal, SweepContext};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::TimingBreakdown;
use crate::error::RadonError;
use crate::geometry::Point2d;
use crate::image::NormalizedImage;
use crate::traversal::BoundaryPixelBrowser;
use crate::transform::TransformResult;
use log::{debug, error, info};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

struct Inner {
    executor: Arc<dyn TaskExecutor>,
    integrator: Arc<dyn LineIntegrator>,
    completion: Completion<Arc<RadonOutcome>>,
    started: AtomicBool,
    pending: Arc<AtomicUsize>,
    outcome: OnceLock<Arc<RadonOutcome>>,
}

/// Single-use Radon transform calculator.
///
/// Sweeps every line between pairs of boundary pixels on the injected
/// [`TaskExecutor`], accumulates the line integrals into a
/// [`TransformResult`] and settles its [`Completion`] with the outcome. A
/// calculator runs exactly once; cloning shares the same run.
#[derive(Clone)]
pub struct RadonCalculator {
    inner: Arc<Inner>,
}

impl fmt::Debug for RadonCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadonCalculator")
            .field("started", &self.inner.started.load(Ordering::Acquire))
            .field("pending", &self.pending_tasks())
            .field("completion", &self.inner.completion)
            .finish()
    }
}

impl RadonCalculator {
    pub fn new(executor: Arc<dyn TaskExecutor>) -> Self {
        Self::assemble(executor, Arc::new(IntensitySum), Completion::new())
    }

    fn assemble(
        executor: Arc<dyn TaskExecutor>,
        integrator: Arc<dyn LineIntegrator>,
        completion: Completion<Arc<RadonOutcome>>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                executor,
                integrator,
                completion,
                started: AtomicBool::new(false),
                pending: Arc::new(AtomicUsize::new(0)),
                outcome: OnceLock::new(),
            }),
        }
    }

    /// Replaces the per-line integration policy.
    pub fn with_integrator(self, integrator: Arc<dyn LineIntegrator>) -> Self {
        let completion = self.inner.completion.clone();
        Self::assemble(Arc::clone(&self.inner.executor), integrator, completion)
    }

    /// Settles `completion` instead of a private handle.
    pub fn with_completion(self, completion: Completion<Arc<RadonOutcome>>) -> Self {
        Self::assemble(
            Arc::clone(&self.inner.executor),
            Arc::clone(&self.inner.integrator),
            completion,
        )
    }

    /// Handle settled when the run ends (or when it is cancelled).
    pub fn completion(&self) -> Completion<Arc<RadonOutcome>> {
        self.inner.completion.clone()
    }

    /// Tasks dispatched but not yet settled.
    pub fn pending_tasks(&self) -> usize {
        self.inner.pending.load(Ordering::Acquire)
    }

    /// Outcome of the run, available once it finished, even after a cancel.
    pub fn outcome(&self) -> Option<Arc<RadonOutcome>> {
        self.inner.outcome.get().cloned()
    }

    /// Requests cooperative cancellation. Returns `false` if the handle was
    /// already settled.
    pub fn cancel(&self) -> bool {
        let cancelled = self.inner.completion.cancel();
        if cancelled {
            info!(
                "RadonCalculator::cancel requested pending={}",
                self.pending_tasks()
            );
        }
        cancelled
    }

    /// Starts the run on a coordinator thread and returns immediately.
    ///
    /// Validation errors are returned synchronously and also settle the
    /// handle as failed.
    pub fn run(
        &self,
        image: NormalizedImage,
        timeout: Duration,
    ) -> Result<Completion<Arc<RadonOutcome>>, RadonError> {
        let started_at = self.begin(&image)?;
        let this = self.clone();
        thread::Builder::new()
            .name("radon-coordinator".to_string())
            .spawn(move || {
                this.execute(image, timeout, started_at);
            })
            .map_err(|e| {
                let err = RadonError::ExecutorUnavailable(e.to_string());
                self.inner.completion.fail(err.clone());
                err
            })?;
        Ok(self.completion())
    }

    /// Runs on the calling thread and returns the outcome once all tasks
    /// settled or the timeout elapsed.
    pub fn process(
        &self,
        image: NormalizedImage,
        timeout: Duration,
    ) -> Result<Arc<RadonOutcome>, RadonError> {
        let started_at = self.begin(&image)?;
        Ok(self.execute(image, timeout, started_at))
    }

    fn begin(&self, image: &NormalizedImage) -> Result<Instant, RadonError> {
        let started_at = Instant::now();
        if self.inner.started.swap(true, Ordering::AcqRel) {
            return Err(RadonError::AlreadyRun);
        }
        if image.w < 3 || image.h < 3 {
            let err = RadonError::ImageTooSmall {
                width: image.w,
                height: image.h,
            };
            error!("RadonCalculator::process rejected input: {err}");
            self.inner.completion.fail(err.clone());
            return Err(err);
        }
        Ok(started_at)
    }

    fn execute(
        &self,
        image: NormalizedImage,
        timeout: Duration,
        started_at: Instant,
    ) -> Arc<RadonOutcome> {
        let (width, height) = (image.w, image.h);
        let center = Point2d::new((width as f64 - 1.0) * 0.5, (height as f64 - 1.0) * 0.5);
        let result = Arc::new(TransformResult::new(width, height));
        let deadline = deadline_after(started_at, timeout);
        debug!(
            "RadonCalculator::process start w={} h={} buckets={} timeout_ms={}",
            width,
            height,
            result.discretization().num_buckets,
            timeout.as_millis()
        );

        let ctx = Arc::new(SweepContext {
            image,
            center,
            browser: BoundaryPixelBrowser::new(width, height),
            result: Arc::clone(&result),
            integrator: Arc::clone(&self.inner.integrator),
            stop: StopSignal::new(deadline, &self.inner.completion),
            successes: AtomicUsize::new(0),
            latch: CompletionLatch::new(),
            pending: Arc::clone(&self.inner.pending),
        });
        let mut timings = TimingBreakdown::default();

        let mut dispatched = 0usize;
        for task in plan_tasks(width, height) {
            dispatched += 1;
            self.inner.pending.fetch_add(1, Ordering::AcqRel);
            let task_ctx = Arc::clone(&ctx);
            self.inner
                .executor
                .execute(Box::new(move || task_ctx.run(task)));
            if ctx.stop.should_stop() {
                break;
            }
        }
        let dispatched_at = timings.lap("dispatch", started_at);
        debug!("RadonCalculator::process dispatched={}", dispatched);

        let remaining = deadline.saturating_duration_since(Instant::now());
        let all_settled = ctx.latch.wait_for(dispatched, remaining);
        let waited_at = timings.lap("wait", dispatched_at);

        if let Err(err) = result.finish() {
            error!("RadonCalculator::process {err}");
        }
        let finished_at = timings.lap("finish", waited_at);

        let timed_out = !all_settled || ctx.stop.deadline_hit();
        let cancelled = self.inner.completion.is_cancelled();
        let successes = ctx.successes.load(Ordering::Acquire);
        let status = RunStatus::classify(successes, dispatched, timed_out, cancelled);
        timings.total_ms = elapsed_ms(started_at, finished_at);

        let outcome = Arc::new(RadonOutcome {
            status,
            succeeded: status == RunStatus::Succeeded,
            timed_out,
            cancelled,
            processing_time_ms: timings.total_ms,
            tasks_dispatched: dispatched,
            successes,
            timings,
            width,
            height,
            image_center: center,
            result,
        });
        match outcome.status_text() {
            Some(text) => error!("RadonCalculator::process {text}"),
            None => info!("Successful radon transform computation"),
        }
        debug!("RadonCalculator::process timings={:?}", outcome.timings);

        let _ = self.inner.outcome.set(Arc::clone(&outcome));
        self.inner.completion.complete(Arc::clone(&outcome));
        outcome
    }
}

/// `start + timeout`, saturating at roughly a century for huge timeouts.
fn deadline_after(start: Instant, timeout: Duration) -> Instant {
    start
        .checked_add(timeout)
        .or_else(|| start.checked_add(Duration::from_secs(100 * 365 * 24 * 3600)))
        .unwrap_or(start)
}
