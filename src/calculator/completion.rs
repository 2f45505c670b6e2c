//! One-shot completion handle with blocking waits and settlement callbacks.
//!
//! The first of `complete`, `fail` or `cancel` wins; later attempts return
//! `false` and change nothing. Callbacks run exactly once, on the thread that
//! settles the handle, or immediately when registered after settlement.

use crate::error::{CompletionError, RadonError};
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Final state of a [`Completion`].
#[derive(Clone, Debug, PartialEq)]
pub enum Settlement<T> {
    Completed(T),
    Failed(RadonError),
    Cancelled,
}

impl<T: Clone> Settlement<T> {
    fn to_result(&self) -> Result<T, CompletionError> {
        match self {
            Settlement::Completed(value) => Ok(value.clone()),
            Settlement::Failed(err) => Err(CompletionError::Failed(err.clone())),
            Settlement::Cancelled => Err(CompletionError::Cancelled),
        }
    }
}

type Callback<T> = Box<dyn FnOnce(&Settlement<T>) + Send + 'static>;

struct State<T> {
    settlement: Option<Settlement<T>>,
    callbacks: Vec<Callback<T>>,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    cv: Condvar,
}

/// Cloneable handle to the eventual result of a computation.
pub struct Completion<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Completion<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Default for Completion<T> {
    fn default() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    settlement: None,
                    callbacks: Vec::new(),
                }),
                cv: Condvar::new(),
            }),
        }
    }
}

impl<T> fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        let status = match &state.settlement {
            None => "pending",
            Some(Settlement::Completed(_)) => "completed",
            Some(Settlement::Failed(_)) => "failed",
            Some(Settlement::Cancelled) => "cancelled",
        };
        f.debug_struct("Completion").field("status", &status).finish()
    }
}

impl<T: Clone + Send + 'static> Completion<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn complete(&self, value: T) -> bool {
        self.settle(Settlement::Completed(value))
    }

    pub fn fail(&self, err: RadonError) -> bool {
        self.settle(Settlement::Failed(err))
    }

    pub fn cancel(&self) -> bool {
        self.settle(Settlement::Cancelled)
    }

    fn settle(&self, settlement: Settlement<T>) -> bool {
        let callbacks = {
            let mut state = self.shared.state.lock();
            if state.settlement.is_some() {
                return false;
            }
            state.settlement = Some(settlement.clone());
            std::mem::take(&mut state.callbacks)
        };
        self.shared.cv.notify_all();
        for callback in callbacks {
            callback(&settlement);
        }
        true
    }

    /// `true` once settled in any way.
    pub fn is_done(&self) -> bool {
        self.shared.state.lock().settlement.is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self.shared.state.lock().settlement,
            Some(Settlement::Cancelled)
        )
    }

    /// Current settlement without blocking.
    pub fn peek(&self) -> Option<Settlement<T>> {
        self.shared.state.lock().settlement.clone()
    }

    /// Registers `callback` to run once on settlement.
    pub fn on_settled<F>(&self, callback: F)
    where
        F: FnOnce(&Settlement<T>) + Send + 'static,
    {
        let settled = {
            let mut state = self.shared.state.lock();
            match &state.settlement {
                Some(settlement) => settlement.clone(),
                None => {
                    state.callbacks.push(Box::new(callback));
                    return;
                }
            }
        };
        callback(&settled);
    }

    /// Blocks until settled.
    pub fn wait(&self) -> Result<T, CompletionError> {
        let mut state = self.shared.state.lock();
        loop {
            if let Some(settlement) = &state.settlement {
                return settlement.to_result();
            }
            self.shared.cv.wait(&mut state);
        }
    }

    /// Blocks until settled or `timeout` elapses, in which case
    /// [`CompletionError::Timeout`] is returned and the handle stays pending.
    pub fn wait_timeout(&self, timeout: Duration) -> Result<T, CompletionError> {
        let deadline = Instant::now() + timeout;
        let mut state = self.shared.state.lock();
        loop {
            if let Some(settlement) = &state.settlement {
                return settlement.to_result();
            }
            if self.shared.cv.wait_until(&mut state, deadline).timed_out() {
                return match &state.settlement {
                    Some(settlement) => settlement.to_result(),
                    None => Err(CompletionError::Timeout),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn first_settlement_wins() {
        let c: Completion<u32> = Completion::new();
        assert!(!c.is_done());
        assert!(c.complete(7));
        assert!(!c.complete(8));
        assert!(!c.cancel());
        assert!(!c.fail(RadonError::AlreadyRun));
        assert!(c.is_done());
        assert!(!c.is_cancelled());
        assert_eq!(c.wait(), Ok(7));
        assert_eq!(c.peek(), Some(Settlement::Completed(7)));
    }

    #[test]
    fn cancel_and_fail_surface_as_errors() {
        let c: Completion<u32> = Completion::new();
        assert!(c.cancel());
        assert!(c.is_cancelled());
        assert_eq!(c.wait(), Err(CompletionError::Cancelled));

        let c: Completion<u32> = Completion::new();
        c.fail(RadonError::ImageTooSmall { width: 2, height: 9 });
        assert_eq!(
            c.wait_timeout(Duration::from_millis(1)),
            Err(CompletionError::Failed(RadonError::ImageTooSmall {
                width: 2,
                height: 9
            }))
        );
    }

    #[test]
    fn wait_timeout_leaves_handle_pending() {
        let c: Completion<u32> = Completion::new();
        assert_eq!(
            c.wait_timeout(Duration::from_millis(10)),
            Err(CompletionError::Timeout)
        );
        assert!(!c.is_done());
        assert!(c.complete(1));
    }

    #[test]
    fn waiters_wake_on_completion_from_another_thread() {
        let c: Completion<String> = Completion::new();
        let producer = c.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            producer.complete("done".to_string())
        });
        assert_eq!(c.wait_timeout(Duration::from_secs(5)), Ok("done".to_string()));
        assert!(handle.join().unwrap());
    }

    #[test]
    fn callbacks_run_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c: Completion<u32> = Completion::new();
        let before = Arc::clone(&calls);
        c.on_settled(move |s| {
            assert_eq!(s, &Settlement::Completed(3));
            before.fetch_add(1, Ordering::SeqCst);
        });
        c.complete(3);
        c.complete(4);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let after = Arc::clone(&calls);
        c.on_settled(move |_| {
            after.fetch_add(10, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 11);
    }
}
