//! Scheduler backed by the tokio runtime.

use super::{Scheduler, SchedulerError, TimerHandle};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::trace;

type Tasks = Arc<Mutex<HashMap<TimerHandle, JoinHandle<()>>>>;

/// Scheduler that sleeps on the current tokio runtime.
///
/// Each timer is a spawned task; when it wakes it sends its handle on the
/// channel returned by [`new`](Self::new). The driver owns the receiving end
/// and forwards each handle to the machine on its own task, so the machine
/// is never touched from the timer task.
#[derive(Debug)]
pub struct RuntimeScheduler {
    next_id: AtomicU64,
    tasks: Tasks,
    expired: UnboundedSender<TimerHandle>,
}

impl RuntimeScheduler {
    pub fn new() -> (Arc<Self>, UnboundedReceiver<TimerHandle>) {
        let (expired, receiver) = mpsc::unbounded_channel();
        let scheduler = Arc::new(Self {
            next_id: AtomicU64::new(0),
            tasks: Arc::new(Mutex::new(HashMap::new())),
            expired,
        });
        (scheduler, receiver)
    }

    /// Number of timers still sleeping.
    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }
}

impl Scheduler for RuntimeScheduler {
    fn create_timer(&self, duration: Duration) -> Result<TimerHandle, SchedulerError> {
        let runtime = Handle::try_current().map_err(|_| SchedulerError::RuntimeUnavailable)?;
        let handle = TimerHandle::from_raw(self.next_id.fetch_add(1, Ordering::Relaxed));

        let tasks = Arc::clone(&self.tasks);
        let expired = self.expired.clone();

        // Hold the lock across spawn so the task cannot finish and deregister
        // before it is registered.
        let mut registry = self.tasks.lock();
        let task = runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            if tasks.lock().remove(&handle).is_some() {
                trace!(%handle, "timer expired");
                // The driver may have gone away; nothing left to notify.
                let _ = expired.send(handle);
            }
        });
        registry.insert(handle, task);
        Ok(handle)
    }

    fn cancel_timer(&self, handle: TimerHandle) {
        if let Some(task) = self.tasks.lock().remove(&handle) {
            task.abort();
        }
    }
}
