//! Scoped one-shot timer owned by a state.

use super::{SchedulerError, SharedScheduler, TimerHandle};
use std::fmt;
use std::time::Duration;

/// A timer that is canceled when its owner is dropped.
///
/// States that time out own one guard each. Replacing the state drops the
/// guard, which cancels any still-armed timer, so an expiry can never be
/// delivered into a state that no longer exists.
pub struct TimeoutGuard {
    scheduler: SharedScheduler,
    handle: Option<TimerHandle>,
}

impl TimeoutGuard {
    /// A guard with no timer armed yet.
    pub fn disarmed(scheduler: SharedScheduler) -> Self {
        Self {
            scheduler,
            handle: None,
        }
    }

    /// Cancel any outstanding timer and arm a new one.
    ///
    /// On error the guard is left disarmed.
    pub fn restart(&mut self, duration: Duration) -> Result<(), SchedulerError> {
        self.cancel();
        self.handle = Some(self.scheduler.create_timer(duration)?);
        Ok(())
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel_timer(handle);
        }
    }

    /// Consume an expiry. Returns `true` and disarms when `handle` is the
    /// timer this guard is waiting on.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.handle == Some(handle) {
            self.handle = None;
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.handle
    }
}

impl Drop for TimeoutGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for TimeoutGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeoutGuard")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}
