//! Fan-out of a run into independent sweep tasks.
//!
//! A task pairs one start pixel on a boundary edge with every pixel of a
//! second edge. All six unordered edge pairs are covered, so lines between
//! adjacent and opposite sides are both sampled; near-duplicate lines found
//! through different pairs collapse during peak merging.

use super::completion::Completion;
use super::integrate::LineIntegrator;
use super::latch::CompletionLatch;
use super::outcome::RadonOutcome;
use crate::error::RadonError;
use crate::geometry::{line_rho_theta, Point2d};
use crate::image::NormalizedImage;
use crate::traversal::{BoundaryEdge, BoundaryPixelBrowser};
use crate::transform::TransformResult;
use log::error;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Edge pairs swept by a run, in dispatch order.
pub const EDGE_PAIRS: [(BoundaryEdge, BoundaryEdge); 6] = [
    (BoundaryEdge::North, BoundaryEdge::East),
    (BoundaryEdge::North, BoundaryEdge::South),
    (BoundaryEdge::North, BoundaryEdge::West),
    (BoundaryEdge::East, BoundaryEdge::South),
    (BoundaryEdge::East, BoundaryEdge::West),
    (BoundaryEdge::South, BoundaryEdge::West),
];

/// One unit of work: every line from `start` to a pixel of `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepTask {
    pub source: BoundaryEdge,
    pub start: Point2d,
    pub target: BoundaryEdge,
}

/// Tasks of a `width × height` image in dispatch order.
pub fn plan_tasks(width: usize, height: usize) -> impl Iterator<Item = SweepTask> {
    let browser = BoundaryPixelBrowser::new(width, height);
    EDGE_PAIRS.into_iter().flat_map(move |(source, target)| {
        browser.pixels(source).map(move |start| SweepTask {
            source,
            start,
            target,
        })
    })
}

/// Cooperative stop condition shared by the coordinator and its tasks.
///
/// Settlement of the handle is mirrored into an atomic flag so the per-line
/// check never takes the handle's lock.
pub(crate) struct StopSignal {
    deadline: Instant,
    deadline_hit: AtomicBool,
    settled: Arc<AtomicBool>,
}

impl StopSignal {
    pub(crate) fn new(deadline: Instant, completion: &Completion<Arc<RadonOutcome>>) -> Self {
        let settled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&settled);
        completion.on_settled(move |_| flag.store(true, Ordering::Release));
        Self {
            deadline,
            deadline_hit: AtomicBool::new(false),
            settled,
        }
    }

    /// True once the deadline passed or the handle settled (cancelled).
    pub(crate) fn should_stop(&self) -> bool {
        if self.deadline_hit.load(Ordering::Acquire) || self.settled.load(Ordering::Acquire) {
            return true;
        }
        if Instant::now() >= self.deadline {
            self.deadline_hit.store(true, Ordering::Release);
            return true;
        }
        false
    }

    pub(crate) fn deadline_hit(&self) -> bool {
        self.deadline_hit.load(Ordering::Acquire)
    }
}

/// Read-mostly state shared by all tasks of one run.
pub(crate) struct SweepContext {
    pub(crate) image: NormalizedImage,
    pub(crate) center: Point2d,
    pub(crate) browser: BoundaryPixelBrowser,
    pub(crate) result: Arc<TransformResult>,
    pub(crate) integrator: Arc<dyn LineIntegrator>,
    pub(crate) stop: StopSignal,
    pub(crate) successes: AtomicUsize,
    pub(crate) latch: CompletionLatch,
    pub(crate) pending: Arc<AtomicUsize>,
}

impl SweepContext {
    /// Runs `task` and settles its accounting, whatever happens inside.
    pub(crate) fn run(&self, task: SweepTask) {
        match catch_unwind(AssertUnwindSafe(|| self.sweep(&task))) {
            Ok(Ok(())) => {
                self.successes.fetch_add(1, Ordering::AcqRel);
            }
            Ok(Err(err)) => {
                error!(
                    "RadonCalculator::sweep {}->{} from ({}, {}) failed: {err}",
                    task.source, task.target, task.start.x, task.start.y
                );
            }
            Err(payload) => {
                let err = RadonError::TaskPanicked(panic_message(payload.as_ref()));
                error!(
                    "RadonCalculator::sweep {}->{} from ({}, {}) failed: {err}",
                    task.source, task.target, task.start.x, task.start.y
                );
            }
        }
        self.pending.fetch_sub(1, Ordering::AcqRel);
        self.latch.release();
    }

    fn sweep(&self, task: &SweepTask) -> Result<(), RadonError> {
        let start = (task.start.int_x(), task.start.int_y());
        let mut failure = None;
        self.browser.browse(task.target, |end| {
            if end != task.start {
                match self
                    .integrator
                    .integrate(&self.image, start, (end.int_x(), end.int_y()))
                {
                    Ok(integral) => {
                        let rho_theta = line_rho_theta(self.center, task.start, end);
                        self.result
                            .set(rho_theta, integral.accumulation, integral.count);
                    }
                    Err(err) => {
                        failure = Some(err);
                        return false;
                    }
                }
            }
            !self.stop.should_stop()
        });
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_covers_every_start_pixel_of_each_pair() {
        let (w, h) = (7, 5);
        let tasks: Vec<SweepTask> = plan_tasks(w, h).collect();
        let browser = BoundaryPixelBrowser::new(w, h);
        let expected: usize = EDGE_PAIRS
            .iter()
            .map(|(source, _)| browser.len(*source))
            .sum();
        assert_eq!(tasks.len(), expected);
        assert_eq!(tasks[0].source, BoundaryEdge::North);
        assert_eq!(tasks[0].target, BoundaryEdge::East);
        assert_eq!(tasks[0].start, Point2d::new(1.0, 1.0));
        let last = tasks.last().unwrap();
        assert_eq!((last.source, last.target), (BoundaryEdge::South, BoundaryEdge::West));
    }

    #[test]
    fn stop_signal_follows_cancellation_and_deadline() {
        let far = Instant::now() + std::time::Duration::from_secs(3600);
        let completion = Completion::new();
        let stop = StopSignal::new(far, &completion);
        assert!(!stop.should_stop());
        assert!(completion.cancel());
        assert!(stop.should_stop());
        assert!(!stop.deadline_hit());

        let stop = StopSignal::new(Instant::now(), &Completion::new());
        assert!(stop.should_stop());
        assert!(stop.deadline_hit());

        // a handle settled before the run starts stops it right away
        let stop = StopSignal::new(far, &completion);
        assert!(stop.should_stop());
    }

    #[test]
    fn edge_pairs_are_distinct_and_unordered() {
        for (i, a) in EDGE_PAIRS.iter().enumerate() {
            assert_ne!(a.0, a.1);
            for b in &EDGE_PAIRS[i + 1..] {
                assert!(!(a.0 == b.0 && a.1 == b.1) && !(a.0 == b.1 && a.1 == b.0));
            }
        }
    }
}
