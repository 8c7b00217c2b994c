//! Deterministic scheduler driven by a virtual clock.

use super::{Scheduler, SchedulerError, TimerHandle};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::time::Duration;

/// Scheduler whose clock only moves when told to.
///
/// Timers never fire on their own: [`advance`](Self::advance) moves the clock
/// and returns the handles that came due, which the caller delivers to the
/// machine. This keeps tests and simulations fully deterministic.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<TimerHandle, Duration>,
    fail_next: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation.
    pub fn now(&self) -> Duration {
        self.inner.lock().now
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.inner.lock().pending.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.inner.lock().pending.contains_key(&handle)
    }

    /// Deadline of the earliest armed timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner.lock().pending.values().min().copied()
    }

    /// Move the clock forward and collect every timer that came due, ordered
    /// by deadline (creation order breaks ties). Returned timers are no
    /// longer pending.
    pub fn advance(&self, by: Duration) -> Vec<TimerHandle> {
        let mut inner = self.inner.lock();
        inner.now = inner.now.saturating_add(by);
        let now = inner.now;

        let mut due: Vec<(Duration, TimerHandle)> = inner
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(handle, deadline)| (*deadline, *handle))
            .collect();
        due.sort();

        for (_, handle) in &due {
            inner.pending.remove(handle);
        }
        due.into_iter().map(|(_, handle)| handle).collect()
    }

    /// Jump straight to the earliest deadline, if any timer is armed.
    pub fn advance_to_next(&self) -> Vec<TimerHandle> {
        match self.next_deadline() {
            Some(deadline) => self.advance(deadline.saturating_sub(self.now())),
            None => Vec::new(),
        }
    }

    /// Make the next `create_timer` call fail, to exercise fault reporting.
    pub fn fail_next_timer(&self) {
        self.inner.lock().fail_next = true;
    }
}

impl Scheduler for ManualScheduler {
    fn create_timer(&self, duration: Duration) -> Result<TimerHandle, SchedulerError> {
        let mut inner = self.inner.lock();
        if std::mem::take(&mut inner.fail_next) {
            return Err(SchedulerError::Rejected {
                reason: "injected failure".to_string(),
            });
        }

        let handle = TimerHandle::from_raw(inner.next_id);
        inner.next_id += 1;
        let deadline = inner.now.saturating_add(duration);
        inner.pending.insert(handle, deadline);
        Ok(handle)
    }

    fn cancel_timer(&self, handle: TimerHandle) {
        self.inner.lock().pending.remove(&handle);
    }
}
