use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// Counts settled tasks and lets one waiter block until a target count is
/// reached or a deadline passes.
#[derive(Debug, Default)]
pub struct CompletionLatch {
    settled: Mutex<usize>,
    cv: Condvar,
}

impl CompletionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one settled task.
    pub fn release(&self) {
        let mut settled = self.settled.lock();
        *settled += 1;
        self.cv.notify_all();
    }

    pub fn settled(&self) -> usize {
        *self.settled.lock()
    }

    /// Blocks until at least `target` tasks settled. Returns `false` when
    /// `timeout` elapsed first.
    pub fn wait_for(&self, target: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut settled = self.settled.lock();
        while *settled < target {
            if self.cv.wait_until(&mut settled, deadline).timed_out() {
                return *settled >= target;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn wait_returns_once_target_reached() {
        let latch = Arc::new(CompletionLatch::new());
        let handles: Vec<_> = (0..3)
            .map(|_| {
                let latch = Arc::clone(&latch);
                thread::spawn(move || latch.release())
            })
            .collect();
        assert!(latch.wait_for(3, Duration::from_secs(5)));
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(latch.settled(), 3);
    }

    #[test]
    fn wait_times_out_when_short() {
        let latch = CompletionLatch::new();
        latch.release();
        assert!(!latch.wait_for(2, Duration::from_millis(20)));
        assert!(latch.wait_for(1, Duration::ZERO));
        assert!(latch.wait_for(0, Duration::ZERO));
    }
}
