//! Where sweep tasks run.
//!
//! The calculator only needs a "run this job eventually" capability; pool
//! size and scheduling policy belong to the [`TaskExecutor`] implementation.

use crate::error::RadonError;
use log::debug;

/// Boxed unit of work handed to an executor.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

pub trait TaskExecutor: Send + Sync {
    fn execute(&self, job: Job);
}

impl TaskExecutor for rayon::ThreadPool {
    fn execute(&self, job: Job) {
        self.spawn(job);
    }
}

/// Runs every job on the calling thread before `execute` returns.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineExecutor;

impl TaskExecutor for InlineExecutor {
    fn execute(&self, job: Job) {
        job();
    }
}

/// Adapts a closure into an executor, e.g. to wrap an existing scheduler.
pub struct FnExecutor<F>(pub F);

impl<F> TaskExecutor for FnExecutor<F>
where
    F: Fn(Job) + Send + Sync,
{
    fn execute(&self, job: Job) {
        (self.0)(job);
    }
}

/// Dedicated rayon pool; `threads == 0` uses rayon's default size.
pub fn build_thread_pool(threads: usize) -> Result<rayon::ThreadPool, RadonError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("radon-worker-{i}"))
        .build()
        .map_err(|e| RadonError::ExecutorUnavailable(e.to_string()))?;
    debug!(
        "build_thread_pool requested={} actual={}",
        threads,
        pool.current_num_threads()
    );
    Ok(pool)
}
